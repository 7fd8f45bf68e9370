//! User-supplied ODE system.

use crate::Float;

/// User-supplied ODE system with an explicit parameter value.
///
/// Implement this trait for your problem to provide the right-hand side
/// function y' = f(x, y, p). The integrator repeatedly calls `ode` with the
/// current abscissa `x`, state `y` and the problem's parameter value `p`, and
/// expects you to fill `dydx` with the derivative values. Parameters are
/// passed through untouched, so a single right-hand side can be reused across
/// parameter sets.
///
/// # Example
///
/// ```
/// use pkode::ODE;
///
/// struct VanDerPol;
///
/// impl ODE<f64> for VanDerPol {
///     fn ode(&self, _x: f64, y: &[f64], eps: &f64, dydx: &mut [f64]) {
///         dydx[0] = y[1];
///         dydx[1] = ((1.0 - y[0] * y[0]) * y[1] - y[0]) / eps;
///     }
/// }
/// ```
///
/// Closures with fully annotated arguments implement the trait as well:
///
/// ```
/// use pkode::ODE;
///
/// let decay = |_x: f64, y: &[f64], r: &f64, dydx: &mut [f64]| dydx[0] = -r * y[0];
/// let mut dydx = [0.0];
/// decay.ode(0.0, &[2.0], &0.5, &mut dydx);
/// assert_eq!(dydx, [-1.0]);
/// ```
pub trait ODE<P = ()> {
    fn ode(&self, x: Float, y: &[Float], p: &P, dydx: &mut [Float]);
}

impl<P, F> ODE<P> for F
where
    F: Fn(Float, &[Float], &P, &mut [Float]),
{
    fn ode(&self, x: Float, y: &[Float], p: &P, dydx: &mut [Float]) {
        self(x, y, p, dydx)
    }
}
