//! The `solve` entry point

use log::{debug, warn};

use crate::{
    Error, Float,
    core::{ode::ODE, problem::Problem},
    methods::{dp::dopri5, rk::rk23},
};

use super::{
    options::{Method, Options},
    solout::SampleRecorder,
    solution::Solution,
};

/// Solve an initial value problem over its whole span.
///
/// Returns the accepted step endpoints as a [`Solution`] that can be queried
/// continuously with [`Solution::at`]. A span with `t0 == t1` yields the
/// single sample `(t0, y0)`. Any failure (invalid input, divergence, step
/// size underflow, or an exhausted step budget) returns an error and no
/// partial solution. [`Error::Interrupted`] is never returned here.
///
/// # Example
///
/// ```
/// use pkode::prelude::*;
///
/// struct Oscillator;
///
/// impl ODE<f64> for Oscillator {
///     fn ode(&self, _t: f64, y: &[f64], omega: &f64, dydt: &mut [f64]) {
///         dydt[0] = y[1];
///         dydt[1] = -omega * omega * y[0];
///     }
/// }
///
/// let problem = Problem::new(Oscillator, [1.0, 0.0], 1.0, (0.0, 3.0));
/// let options = Options::builder().rel_tol(1e-8).abs_tol(1e-10).build();
/// let sol = solve(&problem, options).unwrap();
/// assert!((sol.at(1.5).unwrap()[0] - 1.5f64.cos()).abs() < 1e-6);
/// ```
pub fn solve<F, P>(problem: &Problem<F, P>, options: Options) -> Result<Solution, Error>
where
    F: ODE<P>,
{
    problem.validate()?;

    let (t0, t1) = problem.t_span;
    let settings = options.settings();
    let mut y = problem.y0.clone();
    let mut recorder = SampleRecorder::new();

    let result = match options.method {
        Method::DOPRI5 => dopri5(
            &problem.f,
            &problem.p,
            t0,
            t1,
            &mut y,
            &options.rel_tol,
            &options.abs_tol,
            &mut recorder,
            &settings,
        ),
        Method::RK23 => rk23(
            &problem.f,
            &problem.p,
            t0,
            t1,
            &mut y,
            &options.rel_tol,
            &options.abs_tol,
            &mut recorder,
            &settings,
        ),
    }?;

    let t = result.x;
    let min_step = options
        .min_step
        .unwrap_or(0.0)
        .max(10.0 * Float::EPSILON * t.abs());
    if let Some(err) = Error::from_status(result.status, t, result.h, min_step, options.max_steps)
    {
        warn!("{:?} integration failed: {err}", options.method);
        return Err(err);
    }

    debug!(
        "{:?} solved [{t0}, {t1}]: {} accepted, {} rejected, {} evaluations",
        options.method, result.steps.accepted, result.steps.rejected, result.evals.ode
    );

    let (t, y, dy) = recorder.into_data();
    Ok(Solution::new(t, y, dy, result.evals, result.steps, result.status))
}
