//! User defined callback hook executed after each accepted step.

use crate::{Float, core::interpolate::Interpolate};

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// The callback is invoked once before the main loop (with `xold == x`) and
/// after every accepted step. The arguments are:
/// - `xold`: the left end of the last accepted step,
/// - `x`: the new abscissa after the accepted step,
/// - `y`: the integrator's current solution at `x`,
/// - `dydx`: the derivative f(x, y, p) at the new point,
/// - `interpolator`: dense output valid on `[xold, x]`.
///
/// Typical uses are printing the solution at equidistant output points,
/// recording samples, or detecting events and returning
/// [`ControlFlag::Interrupt`].
///
/// # Example
///
/// ```
/// use pkode::{ControlFlag, Float, Interpolate, SolOut};
///
/// struct Printer {
///     xout: Float,
///     dx: Float,
/// }
///
/// impl SolOut for Printer {
///     fn solout<I: Interpolate>(
///         &mut self,
///         _xold: Float,
///         x: Float,
///         y: &[Float],
///         _dydx: &[Float],
///         interpolator: &I,
///     ) -> ControlFlag {
///         let mut yi = y.to_vec();
///         while self.xout <= x {
///             interpolator.interpolate(self.xout, &mut yi);
///             println!("x = {}, y = {:?}", self.xout, yi);
///             self.xout += self.dx;
///         }
///         ControlFlag::Continue
///     }
/// }
/// ```
pub trait SolOut {
    fn solout<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        dydx: &[Float],
        interpolator: &I,
    ) -> ControlFlag;
}
