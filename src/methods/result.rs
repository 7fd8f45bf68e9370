//! A struct representing the outputted result of a numerical integrator.

use crate::{Float, core::status::Status};

/// Function evaluation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evals {
    /// Number of right-hand side evaluations
    pub ode: usize,
}

impl Evals {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Step counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steps {
    /// Number of attempted steps
    pub total: usize,
    /// Number of accepted steps
    pub accepted: usize,
    /// Number of rejected steps
    pub rejected: usize,
}

impl Steps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The output of a numerical integrator. The state itself is advanced in
/// place in the caller's buffer.
#[derive(Clone, Debug)]
pub struct IntegrationResult {
    /// The final value of the independent variable
    pub x: Float,
    /// The step size proposed for the next integration step
    pub h: Float,
    /// The status of the integration process
    pub status: Status,
    /// Evaluation counters
    pub evals: Evals,
    /// Step counters
    pub steps: Steps,
}

impl IntegrationResult {
    pub fn new(x: Float, h: Float, status: Status, evals: Evals, steps: Steps) -> Self {
        Self {
            x,
            h,
            status,
            evals,
            steps,
        }
    }
}
