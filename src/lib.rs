//! Adaptive embedded Runge-Kutta integration of ordinary differential equation
//! initial value problems, with cubic Hermite dense output and
//! threshold-crossing queries.
//!
//! ```rust
//! use pkode::prelude::*;
//! use pkode::models::{FirstOrderDecay, DecayParams};
//!
//! let params = DecayParams { rate: 0.2 };
//! let problem = Problem::scalar(FirstOrderDecay, 0.05, params, (0.0, 24.0));
//! let sol = solve(&problem, Options::default()).unwrap();
//!
//! let a = sol.at(0.1).unwrap()[0];
//! assert!((a - 0.05 * (-0.02f64).exp()).abs() < 1e-6);
//!
//! let t_star = sol.find_crossing(0.01, EventDirection::Negative).unwrap();
//! assert!((t_star - 5f64.ln() / 0.2).abs() < 1e-3);
//! ```

mod core;
mod error;
mod methods;
mod solve;

pub mod export;
pub mod models;
pub mod prelude;

pub use crate::core::{
    interpolate::{CubicHermite, Interpolate},
    ode::ODE,
    problem::Problem,
    solout::{ControlFlag, SolOut},
    status::Status,
};
pub use error::Error;
pub use methods::{
    dp::dopri5,
    result::{Evals, IntegrationResult, Steps},
    rk::rk23,
    settings::{Settings, Tolerance},
};
pub use solve::{
    CrossingOptions, EventDirection, Method, Options, Solution, SolutionIter, solve,
};

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Floating point type used throughout the crate, selected by cargo feature.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
