//! Settings for numerical integrators

use std::ops::{Index, IndexMut};

use bon::Builder;

use crate::{Error, Float};

#[derive(Builder, Clone, Debug, Default)]
/// Settings for the numerical integrators. `None` selects the method's default.
pub struct Settings {
    /// The rounding unit, typically machine epsilon
    pub uround: Option<Float>,
    /// safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_min: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values of Beta
    /// ( <= 0.04 ) make the step size control more stable. Negative values
    /// are not accepted.
    pub beta: Option<Float>,
    /// Maximal step size.
    pub hmax: Option<Float>,
    /// Minimum step size. Steps are also never allowed below the roundoff
    /// floor `10 * uround * |x|`.
    pub hmin: Option<Float>,
    /// Initial step size. None will result in an initial guess
    /// provided by the `hinit` heuristic.
    pub h0: Option<Float>,
    /// Maximum number of attempted steps (accepted and rejected).
    pub nmax: Option<usize>,
}

/// Tolerance enum to allow scalar or vector tolerances
/// using [`Into`] trait for easy conversion from `Float`, `[Float; N]`, or `Vec<Float>`
/// users do not need to know or worry this simply allows both
/// `Float` and `[Float; N]` to be passed in as arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Check the tolerance against a state of dimension `n`. `allow_zero`
    /// admits zero entries (a purely absolute or purely relative test).
    pub(crate) fn validate(
        &self,
        name: &'static str,
        n: usize,
        allow_zero: bool,
    ) -> Result<(), Error> {
        let values: &[Float] = match self {
            Tolerance::Scalar(v) => std::slice::from_ref(v),
            Tolerance::Vector(vs) => {
                if vs.len() != n {
                    return Err(Error::ToleranceShape {
                        expected: n,
                        actual: vs.len(),
                    });
                }
                vs
            }
        };
        for &value in values {
            let too_small = if allow_zero { value < 0.0 } else { value <= 0.0 };
            if too_small || !value.is_finite() {
                return Err(Error::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}

impl IndexMut<usize> for Tolerance {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &mut vs[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tolerance_indexes_every_component() {
        let tol = Tolerance::from(1e-6);
        assert_eq!(tol[0], 1e-6);
        assert_eq!(tol[7], 1e-6);
    }

    #[test]
    fn vector_tolerance_must_match_state() {
        let tol = Tolerance::from([1e-6, 1e-8]);
        assert!(tol.validate("abs_tol", 2, false).is_ok());
        assert_eq!(
            tol.validate("abs_tol", 3, false),
            Err(Error::ToleranceShape {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn zero_only_allowed_when_requested() {
        let tol = Tolerance::from(0.0);
        assert!(tol.validate("rel_tol", 1, true).is_ok());
        assert_eq!(
            tol.validate("abs_tol", 1, false),
            Err(Error::InvalidTolerance {
                name: "abs_tol",
                value: 0.0
            })
        );
    }

    #[test]
    fn negative_and_nan_rejected() {
        assert!(Tolerance::from(-1e-3).validate("rel_tol", 1, true).is_err());
        assert!(Tolerance::from(vec![1e-3, Float::NAN])
            .validate("rel_tol", 2, true)
            .is_err());
    }
}
