//! Immutable description of an initial value problem.

use crate::{Error, Float, core::ode::ODE};

/// An initial value problem `y' = f(x, y, p)`, `y(t0) = y0`, on `[t0, t1]`.
///
/// The parameter value `p` is owned by the problem and handed to the
/// right-hand side on every evaluation.
#[derive(Debug, Clone)]
pub struct Problem<F, P = ()> {
    pub f: F,
    pub y0: Vec<Float>,
    pub p: P,
    pub t_span: (Float, Float),
}

impl<F, P> Problem<F, P>
where
    F: ODE<P>,
{
    pub fn new(f: F, y0: impl Into<Vec<Float>>, p: P, t_span: (Float, Float)) -> Self {
        Self {
            f,
            y0: y0.into(),
            p,
            t_span,
        }
    }

    /// Problem with a single state variable.
    pub fn scalar(f: F, y0: Float, p: P, t_span: (Float, Float)) -> Self {
        Self::new(f, vec![y0], p, t_span)
    }

    /// Number of state variables.
    pub fn dim(&self) -> usize {
        self.y0.len()
    }

    /// Check the span and initial state before integrating.
    pub fn validate(&self) -> Result<(), Error> {
        let (t0, t1) = self.t_span;
        if !t0.is_finite() || !t1.is_finite() {
            return Err(Error::InvalidProblem(format!(
                "time span must be finite (got [{t0}, {t1}])"
            )));
        }
        if t1 < t0 {
            return Err(Error::InvalidProblem(format!(
                "time span must satisfy t0 <= t1 (got [{t0}, {t1}])"
            )));
        }
        if self.y0.is_empty() {
            return Err(Error::InvalidProblem("initial state is empty".into()));
        }
        if let Some(i) = self.y0.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidProblem(format!(
                "initial state component {i} is not finite (got {})",
                self.y0[i]
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Zero;

    impl ODE for Zero {
        fn ode(&self, _x: Float, _y: &[Float], _p: &(), dydx: &mut [Float]) {
            dydx.fill(0.0);
        }
    }

    #[test]
    fn accepts_well_formed_problems() {
        assert!(Problem::new(Zero, [1.0, 2.0], (), (0.0, 1.0)).validate().is_ok());
        assert!(Problem::scalar(Zero, 1.0, (), (3.0, 3.0)).validate().is_ok());
    }

    #[test]
    fn rejects_reversed_span() {
        let err = Problem::scalar(Zero, 1.0, (), (1.0, 0.0))
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidProblem(_)));
    }

    #[test]
    fn rejects_non_finite_span_and_state() {
        let p = Problem::scalar(Zero, 1.0, (), (0.0, Float::INFINITY));
        assert!(matches!(p.validate(), Err(Error::InvalidProblem(_))));

        let p = Problem::new(Zero, [1.0, Float::NAN], (), (0.0, 1.0));
        assert!(matches!(p.validate(), Err(Error::InvalidProblem(_))));
    }

    #[test]
    fn rejects_empty_state() {
        let p = Problem::new(Zero, Vec::<Float>::new(), (), (0.0, 1.0));
        assert!(matches!(p.validate(), Err(Error::InvalidProblem(_))));
    }
}
