//! High-level solve module: options, the `solve` entry point, and the
//! queryable `Solution`.

mod event;
mod ivp;
mod options;
mod solout;
mod solution;

pub use event::{CrossingOptions, EventDirection};
pub use ivp::solve;
pub use options::{Method, Options};
pub use solution::{Solution, SolutionIter};
