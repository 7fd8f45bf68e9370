//! Errors for problem validation, integration, and solution queries

use thiserror::Error;

use crate::{Float, core::status::Status};

/// Every failure the crate reports. Integration failures carry the abscissa
/// at which the integrator gave up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed time span, initial state, or query argument.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),
    /// The trial state or its derivative became NaN or infinite.
    #[error("state became non-finite at t = {t}")]
    Divergence { t: Float },
    /// The step size required to meet the tolerance fell below the minimum.
    #[error("step size {h:e} fell below the minimum {min_step:e} at t = {t}")]
    StepSizeUnderflow { t: Float, h: Float, min_step: Float },
    /// The step budget was exhausted before reaching the end of the span.
    #[error("step budget of {max_steps} exhausted at t = {t}")]
    MaxStepsExceeded { t: Float, max_steps: usize },
    /// A query time lies outside the solved span.
    #[error("t = {t} lies outside the solved span [{t0}, {t1}]")]
    OutOfRange { t: Float, t0: Float, t1: Float },
    /// No sign change of `state - threshold` across the sampled range.
    #[error("threshold {threshold} is never crossed")]
    NotFound { threshold: Float },
    /// A [`SolOut`](crate::SolOut) observer stopped the integration early.
    ///
    /// Never returned by [`solve`](crate::solve), whose internal recorder
    /// always continues. Callers driving [`dopri5`](crate::dopri5) or
    /// [`rk23`](crate::rk23) directly see [`Status::UserInterrupt`](crate::Status)
    /// and may convert it with [`Error::from_status`].
    #[error("integration interrupted by the step observer at t = {t}")]
    Interrupted { t: Float },

    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),
    #[error("scale factors must satisfy 0 < scale_min < 1 < scale_max (got {0}, {1})")]
    InvalidScaleFactors(Float, Float),
    #[error("beta must be in [0, 0.2] (got {0})")]
    BetaOutOfRange(Float),
    #[error("{name} must be positive and finite (got {value})")]
    InvalidTolerance { name: &'static str, value: Float },
    #[error("tolerance vector has {actual} entries but the state has {expected}")]
    ToleranceShape { expected: usize, actual: usize },
    #[error("invalid step bounds: {0}")]
    InvalidStepBounds(String),
    #[error("max_steps must be positive (got {0})")]
    MaxStepsMustBePositive(usize),

    /// Writing exported samples failed.
    #[error("export failed: {0}")]
    Export(String),
}

impl Error {
    /// Error for a kernel run that ended with a non-success `status` at
    /// abscissa `t`. `h` is the last attempted step, `min_step` the floor it
    /// was compared with, `max_steps` the step budget. `None` on success.
    pub fn from_status(
        status: Status,
        t: Float,
        h: Float,
        min_step: Float,
        max_steps: usize,
    ) -> Option<Self> {
        match status {
            Status::Success => None,
            Status::Diverged => Some(Error::Divergence { t }),
            Status::StepSizeTooSmall => Some(Error::StepSizeUnderflow {
                t,
                h: h.abs(),
                min_step,
            }),
            Status::NeedLargerNMax => Some(Error::MaxStepsExceeded { t, max_steps }),
            Status::UserInterrupt => Some(Error::Interrupted { t }),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Export(err.to_string())
    }
}
