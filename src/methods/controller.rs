//! Step-size control shared by the embedded Runge-Kutta pairs.

use log::debug;

use crate::{
    Error, Float,
    methods::settings::{Settings, Tolerance},
};

/// Consecutive stability-limited steps after which the problem is reported
/// as probably stiff.
const NSTIFF: usize = 15;

/// Per-method defaults that differ between the pairs.
pub(crate) struct ControllerDefaults {
    pub order: usize,
    pub scale_max: Float,
    pub beta: Float,
    /// Largest `|h * lambda|` on the negative real axis for which the
    /// stability function stays in `(0, 1)` and the Hermite interpolant of
    /// a decaying solution stays monotone.
    pub stability: Float,
}

/// Validated step-size controller.
///
/// After an accepted step the next step is `h * safety * err^-alpha *
/// err_old^beta` (Lund stabilisation when `beta > 0`), bounded by
/// `[scale_min, scale_max] * h`. Rejected steps never grow. The step is also
/// kept inside the stability region, `|h| * lambda <= stability`, where
/// `lambda` estimates the local Lipschitz constant of the right-hand side.
#[derive(Debug, Clone)]
pub(crate) struct StepController {
    safety: Float,
    scale_min: Float,
    scale_max: Float,
    alpha: Float,
    beta: Float,
    err_old: Float,
    stability: Float,
    limited: usize,
}

impl StepController {
    pub(crate) fn new(settings: &Settings, defaults: ControllerDefaults) -> Result<Self, Error> {
        let safety = settings.safety_factor.unwrap_or(0.9);
        if !(safety > 1e-4 && safety < 1.0) {
            return Err(Error::SafetyFactorOutOfRange(safety));
        }

        let scale_min = settings.scale_min.unwrap_or(0.2);
        let scale_max = settings.scale_max.unwrap_or(defaults.scale_max);
        if !(scale_min > 0.0 && scale_min < 1.0 && scale_max > 1.0 && scale_max.is_finite()) {
            return Err(Error::InvalidScaleFactors(scale_min, scale_max));
        }

        let beta = settings.beta.unwrap_or(defaults.beta);
        if !(0.0..=0.2).contains(&beta) {
            return Err(Error::BetaOutOfRange(beta));
        }

        Ok(Self {
            safety,
            scale_min,
            scale_max,
            alpha: 1.0 / defaults.order as Float - 0.75 * beta,
            beta,
            err_old: 1e-4,
            stability: defaults.stability,
            limited: 0,
        })
    }

    /// Growth factor for the step following an accepted step with error `err`.
    pub(crate) fn accepted(&mut self, err: Float) -> Float {
        let fac = self.safety * err.powf(-self.alpha) * self.err_old.powf(self.beta);
        self.err_old = err.max(1e-4);
        fac.clamp(self.scale_min, self.scale_max)
    }

    /// Shrink factor for retrying a rejected step with error `err`.
    pub(crate) fn rejected(&self, err: Float) -> Float {
        (self.safety * err.powf(-self.alpha)).clamp(self.scale_min, 1.0)
    }

    /// Shrink factor for retrying a step whose trial state or derivative
    /// was not finite.
    pub(crate) fn non_finite(&self) -> Float {
        self.scale_min
    }

    /// Cap the proposed step magnitude `h` so that `h * lambda` stays inside
    /// the stability region.
    pub(crate) fn stable(&mut self, h: Float, lambda: Option<Float>) -> Float {
        let Some(lambda) = lambda.filter(|l| *l > 0.0 && l.is_finite()) else {
            self.limited = 0;
            return h;
        };
        let hstab = self.stability / lambda;
        if h <= hstab {
            self.limited = 0;
            return h;
        }
        self.limited += 1;
        if self.limited == NSTIFF {
            debug!(
                "step size limited by stability for {NSTIFF} steps (|h| = {hstab:e}); \
                 problem is probably stiff"
            );
        }
        hstab
    }
}

/// Estimate of the local Lipschitz constant from two stages evaluated at
/// nearby states: `|k_new - k_stage| / |y_new - y_stage|`. `None` when the
/// states coincide.
pub(crate) fn lipschitz(
    k_new: &[Float],
    k_stage: &[Float],
    y_new: &[Float],
    y_stage: &[Float],
) -> Option<Float> {
    let mut num: Float = 0.0;
    let mut den: Float = 0.0;
    for i in 0..k_new.len() {
        let dk = k_new[i] - k_stage[i];
        let dy = y_new[i] - y_stage[i];
        num += dk * dk;
        den += dy * dy;
    }
    if den > 0.0 {
        Some((num / den).sqrt())
    } else {
        None
    }
}

/// Resolved bounds on the step size.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepBounds {
    pub hmin: Float,
    pub hmax: Float,
    pub uround: Float,
}

impl StepBounds {
    pub(crate) fn new(settings: &Settings, x: Float, xend: Float) -> Result<Self, Error> {
        let uround = settings.uround.unwrap_or(Float::EPSILON);
        if !(uround > 1e-35 && uround < 1.0) {
            return Err(Error::InvalidStepBounds(format!(
                "uround must be in (1e-35, 1.0) (got {uround})"
            )));
        }

        let hmin = settings.hmin.unwrap_or(0.0);
        if !(hmin >= 0.0 && hmin.is_finite()) {
            return Err(Error::InvalidStepBounds(format!(
                "min_step must be non-negative and finite (got {hmin})"
            )));
        }

        let span = (xend - x).abs();
        let hmax = match settings.hmax {
            Some(h) if h > 0.0 => h.min(span),
            Some(h) => {
                return Err(Error::InvalidStepBounds(format!(
                    "max_step must be positive (got {h})"
                )));
            }
            None => span,
        };
        if hmin > hmax && span > 0.0 {
            return Err(Error::InvalidStepBounds(format!(
                "min_step {hmin} exceeds max_step {hmax}"
            )));
        }

        if let Some(h0) = settings.h0 {
            if !(h0 > 0.0 && h0.is_finite()) {
                return Err(Error::InvalidStepBounds(format!(
                    "first_step must be positive (got {h0})"
                )));
            }
        }

        Ok(Self { hmin, hmax, uround })
    }

    /// Smallest step admissible at abscissa `x`.
    pub(crate) fn floor(&self, x: Float) -> Float {
        self.hmin.max(10.0 * self.uround * x.abs())
    }
}

/// Step budget, defaulting to 100 000 attempts.
pub(crate) fn max_steps(settings: &Settings) -> Result<usize, Error> {
    match settings.nmax {
        Some(0) => Err(Error::MaxStepsMustBePositive(0)),
        Some(n) => Ok(n),
        None => Ok(100_000),
    }
}

/// Root-mean-square of the error estimate `err`, each component scaled by
/// `atol + rtol * max(|y|, |y_new|)`.
pub(crate) fn error_norm(
    err: &[Float],
    y: &[Float],
    y_new: &[Float],
    atol: &Tolerance,
    rtol: &Tolerance,
) -> Float {
    let n = err.len();
    let mut sum = 0.0;
    for i in 0..n {
        let sk = atol[i] + rtol[i] * y[i].abs().max(y_new[i].abs());
        sum += (err[i] / sk) * (err[i] / sk);
    }
    (sum / n as Float).sqrt()
}

pub(crate) fn all_finite(v: &[Float]) -> bool {
    v.iter().all(|x| x.is_finite())
}
