//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use pkode::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits and types: `ODE`, `Problem`, `Interpolate`, `SolOut`, `ControlFlag`, `Status`.
//! - High-level API: `solve`, `Options`, `Solution`, `Method`, `EventDirection`, `CrossingOptions`.
//! - The crate `Error` and `Float` types.

pub use crate::core::{
    interpolate::Interpolate,
    ode::ODE,
    problem::Problem,
    solout::{ControlFlag, SolOut},
    status::Status,
};
pub use crate::solve::{CrossingOptions, EventDirection, Method, Options, Solution, solve};
pub use crate::{Error, Float};
