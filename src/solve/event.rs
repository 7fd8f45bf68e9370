//! Threshold-crossing search on the dense output of a solution.

use bon::Builder;
use log::debug;

use crate::{Error, Float, core::interpolate::Interpolate};

use super::solution::Solution;

/// Crossing direction filter.
/// - All: any sign change triggers.
/// - Positive: only crossings from below (value rises through the threshold).
/// - Negative: only crossings from above (value falls through the threshold).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EventDirection {
    #[default]
    All,
    Positive,
    Negative,
}

impl EventDirection {
    /// Whether `ga -> gb` is a sign change of `value - threshold` matching this
    /// direction. A zero at the right end counts as reaching the threshold.
    fn brackets(self, ga: Float, gb: Float) -> bool {
        let rising = ga < 0.0 && gb >= 0.0;
        let falling = ga > 0.0 && gb <= 0.0;
        match self {
            EventDirection::All => rising || falling,
            EventDirection::Positive => rising,
            EventDirection::Negative => falling,
        }
    }
}

// From int
impl From<i32> for EventDirection {
    fn from(v: i32) -> Self {
        match v {
            x if x > 0 => EventDirection::Positive,
            x if x < 0 => EventDirection::Negative,
            _ => EventDirection::All,
        }
    }
}

/// Options for [`Solution::find_crossing_with`].
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct CrossingOptions {
    /// State component to test. Default: 0.
    #[builder(default)]
    pub component: usize,
    /// Which sign changes count. Default: all.
    #[builder(default)]
    pub direction: EventDirection,
    /// Absolute residual `|y(t*) - threshold|` at which refinement stops.
    #[builder(default = 1e-8)]
    pub tol: Float,
    /// Maximum number of refinement iterations.
    #[builder(default = 100)]
    pub max_iter: usize,
}

impl Default for CrossingOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// First time at which the selected component crosses `threshold`.
///
/// Consecutive samples are scanned for a sign change of `y - threshold`; the
/// bracketing interval is refined on its Hermite interpolant with the Illinois
/// variant of regula falsi, falling back to bisection whenever an iteration
/// fails to halve the bracket.
pub(crate) fn find_crossing(
    sol: &Solution,
    threshold: Float,
    options: &CrossingOptions,
) -> Result<Float, Error> {
    sol.check_component(options.component)?;
    if !threshold.is_finite() {
        return Err(Error::InvalidProblem(format!(
            "threshold must be finite (got {threshold})"
        )));
    }
    if !(options.tol > 0.0) {
        return Err(Error::InvalidProblem(format!(
            "crossing tolerance must be positive (got {})",
            options.tol
        )));
    }

    let (t, y) = (sol.times(), sol.states());
    let c = options.component;
    let g = |i: usize| y[i][c] - threshold;

    if g(0) == 0.0 && options.direction == EventDirection::All {
        return Ok(t[0]);
    }

    for i in 0..sol.len().saturating_sub(1) {
        let (ga, gb) = (g(i), g(i + 1));
        if !options.direction.brackets(ga, gb) {
            continue;
        }
        if gb == 0.0 {
            return Ok(t[i + 1]);
        }
        return Ok(refine(sol, i, threshold, ga, gb, options));
    }

    Err(Error::NotFound { threshold })
}

/// Illinois iteration on the dense output of `[t_i, t_{i+1}]`, where the
/// residual has opposite signs `fa`, `fb` at the ends.
fn refine(
    sol: &Solution,
    i: usize,
    threshold: Float,
    mut fa: Float,
    mut fb: Float,
    options: &CrossingOptions,
) -> Float {
    let seg = sol.segment(i);
    let c = options.component;
    let mut yi = vec![0.0; sol.dim()];
    let mut residual = |t: Float| {
        seg.interpolate(t, &mut yi);
        yi[c] - threshold
    };

    let (mut a, mut b) = (sol.times()[i], sol.times()[i + 1]);
    let mut side = 0i8;
    let mut bisect = false;

    for _ in 0..options.max_iter {
        let width = b - a;
        let mut t = if bisect {
            0.5 * (a + b)
        } else {
            b - fb * (b - a) / (fb - fa)
        };
        if !(t > a && t < b) {
            t = 0.5 * (a + b);
        }

        let ft = residual(t);
        if ft.abs() <= options.tol {
            return t;
        }

        if ft * fb > 0.0 {
            b = t;
            fb = ft;
            if side == -1 {
                fa *= 0.5;
            }
            side = -1;
        } else if ft * fa > 0.0 {
            a = t;
            fa = ft;
            if side == 1 {
                fb *= 0.5;
            }
            side = 1;
        } else {
            return t;
        }

        if b - a <= Float::EPSILON * a.abs().max(b.abs()) {
            break;
        }
        bisect = b - a > 0.5 * width;
    }

    // Halved residuals are not true values; compare at the bracket ends.
    let (ra, rb) = (residual(a), residual(b));
    let best = if ra.abs() <= rb.abs() { a } else { b };
    debug!("crossing of {threshold} not refined below {} near t = {best}", options.tol);
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::status::Status,
        methods::result::{Evals, Steps},
    };

    /// Samples of y = 1 - t on [0, 2] with exact derivatives.
    fn line() -> Solution {
        let t = vec![0.0, 0.4, 1.3, 2.0];
        let y = t.iter().map(|&ti| vec![1.0 - ti]).collect();
        let dy = t.iter().map(|_| vec![-1.0]).collect();
        Solution::new(t, y, dy, Evals::new(), Steps::new(), Status::Success)
    }

    #[test]
    fn direction_from_int() {
        assert_eq!(EventDirection::from(1), EventDirection::Positive);
        assert_eq!(EventDirection::from(-3), EventDirection::Negative);
        assert_eq!(EventDirection::from(0), EventDirection::All);
    }

    #[test]
    fn brackets_respect_direction() {
        assert!(EventDirection::Negative.brackets(1.0, -1.0));
        assert!(!EventDirection::Positive.brackets(1.0, -1.0));
        assert!(EventDirection::Positive.brackets(-1.0, 0.0));
        assert!(EventDirection::All.brackets(-1.0, 2.0));
        assert!(!EventDirection::All.brackets(1.0, 2.0));
    }

    #[test]
    fn falling_line_crosses_at_expected_time() {
        let sol = line();
        let t = sol.find_crossing(0.25, EventDirection::Negative).unwrap();
        assert!((t - 0.75).abs() < 1e-8);
    }

    #[test]
    fn wrong_direction_is_not_found() {
        let sol = line();
        assert_eq!(
            sol.find_crossing(0.25, EventDirection::Positive),
            Err(Error::NotFound { threshold: 0.25 })
        );
    }

    #[test]
    fn threshold_outside_range_is_not_found() {
        let sol = line();
        assert!(matches!(
            sol.find_crossing(5.0, EventDirection::All),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn exact_hit_on_sample_returns_sample_time() {
        let sol = line();
        let t = sol.find_crossing(1.0 - 1.3, EventDirection::All).unwrap();
        assert_eq!(t, 1.3);
        assert_eq!(sol.find_crossing(1.0, EventDirection::All).unwrap(), 0.0);
    }

    #[test]
    fn invalid_queries_rejected() {
        let sol = line();
        let opts = CrossingOptions::builder().component(2).build();
        assert!(matches!(
            sol.find_crossing_with(0.5, &opts),
            Err(Error::InvalidProblem(_))
        ));
        let opts = CrossingOptions::builder().tol(0.0).build();
        assert!(sol.find_crossing_with(0.5, &opts).is_err());
        assert!(sol.find_crossing(Float::NAN, EventDirection::All).is_err());
    }
}
