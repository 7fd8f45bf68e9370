//! Core traits and types used throughout the library.

pub mod interpolate;
pub mod ode;
pub mod problem;
pub mod solout;
pub mod status;
