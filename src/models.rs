//! Ready-made right-hand sides.

use crate::{Float, core::ode::ODE};

/// Parameters of first-order elimination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayParams {
    /// Elimination rate constant `r` (per unit time).
    pub rate: Float,
}

/// First-order decay `da/dt = -r a`, applied to every state component.
///
/// Models drug elimination from a single compartment: with dose `a0` the
/// amount remaining is `a0 * exp(-r t)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOrderDecay;

impl ODE<DecayParams> for FirstOrderDecay {
    fn ode(&self, _t: Float, a: &[Float], p: &DecayParams, dadt: &mut [Float]) {
        for i in 0..a.len() {
            dadt[i] = -p.rate * a[i];
        }
    }
}

impl FirstOrderDecay {
    /// Closed-form amount at time `t` (measured from the dose).
    pub fn analytic(a0: Float, p: &DecayParams, t: Float) -> Float {
        a0 * (-p.rate * t).exp()
    }

    /// Time for the amount to fall from `a0` to `level`; `None` when the
    /// level is never reached.
    pub fn time_to(a0: Float, level: Float, p: &DecayParams) -> Option<Float> {
        if p.rate <= 0.0 || level <= 0.0 || a0 <= 0.0 || level > a0 {
            return None;
        }
        Some((a0 / level).ln() / p.rate)
    }

    /// Half-life `ln 2 / r`.
    pub fn half_life(p: &DecayParams) -> Float {
        (2.0 as Float).ln() / p.rate
    }
}
