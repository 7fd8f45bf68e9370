//! DOPRI5 - Dormand–Prince 5(4) explicit Runge–Kutta integrator
//!
//! Reference
//! - E. Hairer, S. P. Nørsett, and G. Wanner, "Solving Ordinary Differential
//!   Equations I. Nonstiff Problems", 2nd ed., Springer (1993).

use log::trace;

use crate::{
    Error, Float,
    core::{
        interpolate::CubicHermite,
        ode::ODE,
        solout::{ControlFlag, SolOut},
        status::Status,
    },
    methods::{
        controller::{
            ControllerDefaults, StepBounds, StepController, all_finite, error_norm, lipschitz,
            max_steps,
        },
        hinit::hinit,
        result::{Evals, IntegrationResult, Steps},
        settings::{Settings, Tolerance},
    },
};

/// Dormand–Prince DOPRI5, an explicit embedded Runge–Kutta 5(4) solver with
/// adaptive step-size control.
///
/// This function integrates `y' = f(x, y, p)` from `x` to `xend`, advancing
/// the provided state buffer `y` in-place. The local error of every step is
/// estimated from the embedded 4th order solution; steps are accepted when the
/// scaled RMS error is at most one. The last step is clamped so that the
/// returned abscissa equals `xend` exactly.
///
/// # Arguments
///
/// ## Defining the Problem
/// - `f`: Right‑hand side implementing `ODE`.
/// - `p`: Parameter value handed to `f` unchanged.
/// - `x`: Initial independent variable value.
/// - `xend`: Final independent variable value.
/// - `y`: Mutable slice containing the initial state; on return contains the
///   state at the returned abscissa.
/// - `rtol`, `atol`: Relative and absolute tolerances (see [`Tolerance`]).
///
/// ## Output Control
/// - `solout`: `SolOut` callback invoked once before the first step and after
///   every accepted step with a cubic Hermite interpolant over that step.
///
/// ## Optional Settings
///
/// - `uround` (default machine epsilon)
/// - `safety_factor` (default `0.9`)
/// - `scale_min` (default `0.2`)
/// - `scale_max` (default `10.0`)
/// - `beta` (default `0.04`, stabilization parameter)
/// - `hmax` (default `|xend - x|`)
/// - `hmin` (default `0`, on top of the roundoff floor)
/// - `h0` (initial step; heuristic if `None`)
/// - `nmax` (default `100_000`)
///
/// # Returns
/// `Ok(IntegrationResult)` whose `status` reports how the run ended, or an
/// `Error` when the inputs fail validation.
pub fn dopri5<F, P, S>(
    f: &F,
    p: &P,
    mut x: Float,
    xend: Float,
    y: &mut [Float],
    rtol: &Tolerance,
    atol: &Tolerance,
    solout: &mut S,
    settings: &Settings,
) -> Result<IntegrationResult, Error>
where
    F: ODE<P>,
    S: SolOut,
{
    // --- Input Validation ---
    let n = y.len();
    rtol.validate("rel_tol", n, true)?;
    atol.validate("abs_tol", n, false)?;
    let mut ctrl = StepController::new(
        settings,
        ControllerDefaults {
            order: 5,
            scale_max: 10.0,
            beta: 0.04,
            stability: 2.0,
        },
    )?;
    let bounds = StepBounds::new(settings, x, xend)?;
    let nmax = max_steps(settings)?;

    // --- Declarations ---
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut k7 = vec![0.0; n];
    let mut y1 = vec![0.0; n];
    let mut yerr = vec![0.0; n];
    let mut yold = vec![0.0; n];
    let mut k1old = vec![0.0; n];
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let mut reject = false;
    let mut non_finite = false;
    let posneg = if xend >= x { 1.0 } else { -1.0 };

    // --- Initializations ---
    f.ode(x, y, p, &mut k1);
    evals.ode += 1;
    if !all_finite(&k1) {
        return Ok(IntegrationResult::new(x, 0.0, Status::Diverged, evals, steps));
    }

    let initial = CubicHermite::new(x, 0.0, y, y, &k1, &k1);
    if solout.solout(x, x, y, &k1, &initial) == ControlFlag::Interrupt {
        return Ok(IntegrationResult::new(x, 0.0, Status::UserInterrupt, evals, steps));
    }
    if x == xend {
        return Ok(IntegrationResult::new(x, 0.0, Status::Success, evals, steps));
    }

    let mut h = match settings.h0 {
        Some(h0) => h0.min(bounds.hmax) * posneg,
        None => {
            evals.ode += 1;
            hinit(
                f, p, x, y, posneg, &k1, &mut k2, &mut y1, 5, bounds.hmax, atol, rtol,
            )
        }
    };

    // --- Main integration loop ---
    let status = loop {
        // Check for maximum number of steps
        if steps.total >= nmax {
            break Status::NeedLargerNMax;
        }

        // Check for step size underflow
        let hmin = bounds.floor(x);
        if h.abs() < hmin || h == 0.0 {
            break if non_finite {
                Status::Diverged
            } else {
                Status::StepSizeTooSmall
            };
        }

        // Adjust last step to land on xend
        let last = (x + 1.01 * h - xend) * posneg >= 0.0;
        if last {
            h = xend - x;
        }

        steps.total += 1;

        // Stage 2
        for i in 0..n {
            y1[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &y1, p, &mut k2);

        // Stage 3
        for i in 0..n {
            y1[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        f.ode(x + C3 * h, &y1, p, &mut k3);

        // Stage 4
        for i in 0..n {
            y1[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        f.ode(x + C4 * h, &y1, p, &mut k4);

        // Stage 5
        for i in 0..n {
            y1[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        f.ode(x + C5 * h, &y1, p, &mut k5);

        // Stage 6
        for i in 0..n {
            y1[i] =
                y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        let xph = if last { xend } else { x + h };
        f.ode(xph, &y1, p, &mut k6);

        // Final stage: 5th order solution and its derivative (FSAL)
        for i in 0..n {
            y1[i] =
                y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        f.ode(xph, &y1, p, &mut k7);
        evals.ode += 6;

        // Error estimation from the embedded 4th order solution
        for i in 0..n {
            yerr[i] =
                h * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i]);
        }
        let err = error_norm(&yerr, y, &y1, atol, rtol);

        non_finite = !all_finite(&y1) || !all_finite(&k7) || !err.is_finite();
        if non_finite {
            // Overshooting trial step, retry with the largest allowed cut
            steps.rejected += 1;
            trace!("dopri5 non-finite trial x = {x}, h = {h:e}");
            h *= ctrl.non_finite();
            reject = true;
            continue;
        }

        if err <= 1.0 {
            // Step accepted
            steps.accepted += 1;
            let fac = ctrl.accepted(err);
            trace!("dopri5 accepted x = {xph}, h = {h:e}, err = {err:.3e}");

            // Stage 6 state, compared with the solution to estimate the
            // dominant eigenvalue
            for i in 0..n {
                yerr[i] = y[i]
                    + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
            }
            let lambda = lipschitz(&k7, &k6, &y1, &yerr);

            yold.copy_from_slice(y);
            k1old.copy_from_slice(&k1);
            y.copy_from_slice(&y1);
            k1.copy_from_slice(&k7);
            let xold = x;
            x = xph;

            let interp = CubicHermite::new(xold, x - xold, &yold, y, &k1old, &k1);
            if solout.solout(xold, x, y, &k1, &interp) == ControlFlag::Interrupt {
                break Status::UserInterrupt;
            }

            // Normal exit
            if last {
                break Status::Success;
            }

            let mut hnew = h.abs() * fac;
            // Prevent oscillations due to previous rejected step
            if reject {
                hnew = hnew.min(h.abs());
                reject = false;
            }
            h = ctrl.stable(hnew, lambda).min(bounds.hmax) * posneg;
        } else {
            // Step rejected
            steps.rejected += 1;
            trace!("dopri5 rejected x = {x}, h = {h:e}, err = {err:.3e}");
            h *= ctrl.rejected(err);
            reject = true;
        }
    };

    Ok(IntegrationResult::new(x, h, status, evals, steps))
}

// DOPRI5 Butcher tableau coefficients
const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

const E1: Float = 71.0 / 57600.0;
const E3: Float = -71.0 / 16695.0;
const E4: Float = 71.0 / 1920.0;
const E5: Float = -17253.0 / 339200.0;
const E6: Float = 22.0 / 525.0;
const E7: Float = -1.0 / 40.0;
