//! Rich solution type for solve: sampled data, stats, and dense evaluation helpers.

use crate::{
    Error, Float,
    core::{
        interpolate::{CubicHermite, Interpolate},
        status::Status,
    },
    methods::result::{Evals, Steps},
};

use super::event::{CrossingOptions, EventDirection, find_crossing};

/// Solution of [`solve`](crate::solve): the accepted step endpoints, the
/// derivative at each of them, and basic stats.
///
/// Sample times are strictly increasing, start at `t0` and end at `t1`.
/// Between samples the solution is evaluated with the cubic Hermite
/// interpolant built from the two bracketing samples and their derivatives.
/// The samples are read-only; use [`times`](Self::times),
/// [`states`](Self::states) and [`derivatives`](Self::derivatives).
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
    /// f(t_i, y_i, p) at every sample.
    dy: Vec<Vec<Float>>,
    pub nfev: usize,
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
    pub status: Status,
}

impl Solution {
    pub(crate) fn new(
        t: Vec<Float>,
        y: Vec<Vec<Float>>,
        dy: Vec<Vec<Float>>,
        evals: Evals,
        steps: Steps,
        status: Status,
    ) -> Self {
        Self {
            t,
            y,
            dy,
            nfev: evals.ode,
            nstep: steps.total,
            naccpt: steps.accepted,
            nrejct: steps.rejected,
            status,
        }
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Number of state variables.
    pub fn dim(&self) -> usize {
        self.y.first().map_or(0, Vec::len)
    }

    /// The solved span `(t0, t1)`.
    pub fn t_span(&self) -> (Float, Float) {
        match (self.t.first(), self.t.last()) {
            (Some(&t0), Some(&t1)) => (t0, t1),
            _ => (Float::NAN, Float::NAN),
        }
    }

    /// Sample times.
    pub fn times(&self) -> &[Float] {
        &self.t
    }

    /// Sample states, parallel to [`times`](Self::times).
    pub fn states(&self) -> &[Vec<Float>] {
        &self.y
    }

    /// Right-hand side `f(t_i, y_i, p)` at every sample, parallel to
    /// [`times`](Self::times).
    pub fn derivatives(&self) -> &[Vec<Float>] {
        &self.dy
    }

    /// One state component at every sample, parallel to [`times`](Self::times).
    pub fn component(&self, index: usize) -> Result<Vec<Float>, Error> {
        self.check_component(index)?;
        Ok(self.y.iter().map(|yi| yi[index]).collect())
    }

    /// Iterate over stored sample pairs (t_i, y_i).
    pub fn iter(&self) -> SolutionIter<'_> {
        SolutionIter {
            t_iter: self.t.iter(),
            y_iter: self.y.iter(),
        }
    }

    /// Evaluate the continuous solution at time `t`.
    ///
    /// Sample times return the stored state exactly. Times outside the solved
    /// span are an [`Error::OutOfRange`].
    pub fn at(&self, t: Float) -> Result<Vec<Float>, Error> {
        let i = self.bracket(t)?;
        if self.t[i] == t {
            return Ok(self.y[i].clone());
        }
        let mut yi = vec![0.0; self.dim()];
        self.segment(i).interpolate(t, &mut yi);
        Ok(yi)
    }

    /// Evaluate the continuous solution at many times. Fails on the first time
    /// outside the solved span.
    pub fn at_many(&self, ts: &[Float]) -> Result<Vec<Vec<Float>>, Error> {
        ts.iter().map(|&t| self.at(t)).collect()
    }

    /// `n` equally spaced times over the solved span and the interpolated
    /// states at them, suitable for plotting.
    pub fn resample(&self, n: usize) -> (Vec<Float>, Vec<Vec<Float>>) {
        let (t0, t1) = self.t_span();
        let ts: Vec<Float> = match n {
            0 => Vec::new(),
            1 => vec![t0],
            _ => (0..n)
                .map(|k| {
                    if k == n - 1 {
                        t1
                    } else {
                        t0 + (t1 - t0) * k as Float / (n - 1) as Float
                    }
                })
                .collect(),
        };
        let ys = ts
            .iter()
            .filter_map(|&t| self.at(t).ok())
            .collect::<Vec<_>>();
        (ts, ys)
    }

    /// Time at which component 0 crosses `threshold` in the given direction,
    /// refined to an absolute residual of `1e-8`.
    pub fn find_crossing(&self, threshold: Float, direction: EventDirection) -> Result<Float, Error> {
        let options = CrossingOptions::builder().direction(direction).build();
        find_crossing(self, threshold, &options)
    }

    /// Time at which the configured component crosses `threshold`.
    pub fn find_crossing_with(
        &self,
        threshold: Float,
        options: &CrossingOptions,
    ) -> Result<Float, Error> {
        find_crossing(self, threshold, options)
    }

    /// Index `i` of the sample interval `[t_i, t_{i+1}]` containing `t`; the
    /// last sample index when `t == t1`.
    pub(crate) fn bracket(&self, t: Float) -> Result<usize, Error> {
        let (t0, t1) = self.t_span();
        if !(t >= t0 && t <= t1) {
            return Err(Error::OutOfRange { t, t0, t1 });
        }
        let after = self.t.partition_point(|&ti| ti <= t);
        Ok(after - 1)
    }

    /// Dense output over `[t_i, t_{i+1}]`.
    pub(crate) fn segment(&self, i: usize) -> CubicHermite<'_> {
        CubicHermite::new(
            self.t[i],
            self.t[i + 1] - self.t[i],
            &self.y[i],
            &self.y[i + 1],
            &self.dy[i],
            &self.dy[i + 1],
        )
    }

    pub(crate) fn check_component(&self, index: usize) -> Result<(), Error> {
        if index >= self.dim() {
            return Err(Error::InvalidProblem(format!(
                "component {index} out of range for a state of dimension {}",
                self.dim()
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = (Float, &'a [Float]);
    type IntoIter = SolutionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over (t, y) pairs of stored samples in a Solution.
pub struct SolutionIter<'a> {
    t_iter: std::slice::Iter<'a, Float>,
    y_iter: std::slice::Iter<'a, Vec<Float>>,
}

impl<'a> Iterator for SolutionIter<'a> {
    type Item = (Float, &'a [Float]);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.t_iter.next(), self.y_iter.next()) {
            (Some(&t), Some(y)) => Some((t, y.as_slice())),
            _ => None,
        }
    }
}
