//! Options and method selection for solve

use bon::Builder;

use crate::{
    Float,
    methods::settings::{Settings, Tolerance},
};

/// Solver method selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Bogacki–Shampine 3(2) adaptive RK
    RK23,
    /// Dormand–Prince 5(4) adaptive RK
    #[default]
    DOPRI5,
}

#[derive(Builder, Clone, Debug)]
/// Tolerance and step-budget configuration for [`solve`](crate::solve).
pub struct Options {
    /// Method to use. Default: DOPRI5 (Dormand–Prince 5(4)).
    #[builder(default)]
    pub method: Method,
    /// Absolute tolerance for error estimation, scalar or per component.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub abs_tol: Tolerance,
    /// Relative tolerance for error estimation, scalar or per component.
    #[builder(default = Tolerance::Scalar(1e-3), into)]
    pub rel_tol: Tolerance,
    /// Minimum step size. Steps are never allowed below the roundoff floor
    /// either.
    pub min_step: Option<Float>,
    /// Maximum step size. Default: the length of the span.
    pub max_step: Option<Float>,
    /// Maximum number of attempted steps, accepted and rejected.
    #[builder(default = 100_000)]
    pub max_steps: usize,
    /// Initial step suggestion. Default: heuristic estimate.
    pub first_step: Option<Float>,
    /// Safety factor in step-size prediction. Default: 0.9.
    pub safety_factor: Option<Float>,
}

impl Default for Options {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Options {
    /// Method-level settings corresponding to these options.
    pub fn settings(&self) -> Settings {
        Settings::builder()
            .maybe_hmin(self.min_step)
            .maybe_hmax(self.max_step)
            .maybe_h0(self.first_step)
            .maybe_safety_factor(self.safety_factor)
            .nmax(self.max_steps)
            .build()
    }
}
