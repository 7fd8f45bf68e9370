#![allow(dead_code)]

use pkode::{
    models::{DecayParams, FirstOrderDecay},
    prelude::*,
};

/// Simple harmonic oscillator y'' = -y as a first-order system.
pub struct SHO;

impl ODE for SHO {
    fn ode(&self, _x: Float, y: &[Float], _p: &(), dydx: &mut [Float]) {
        dydx[0] = y[1];
        dydx[1] = -y[0];
    }
}

pub const RATE: Float = 0.2;
pub const DOSE: Float = 0.05;

/// The drug elimination problem: r = 0.2 per hour, a0 = 0.05, one day.
pub fn decay_problem() -> Problem<FirstOrderDecay, DecayParams> {
    Problem::scalar(FirstOrderDecay, DOSE, DecayParams { rate: RATE }, (0.0, 24.0))
}

pub fn exact_decay(t: Float) -> Float {
    DOSE * (-RATE * t).exp()
}

pub fn tight_opts(method: Method) -> Options {
    Options::builder()
        .method(method)
        .rel_tol(1e-9)
        .abs_tol(1e-12)
        .build()
}
