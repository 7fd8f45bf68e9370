//! Bogacki–Shampine 3(2) pair (RK23) adaptive-step integrator.

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

/// Bogacki–Shampine 3(2) pair (RK23) adaptive-step integrator.
///
/// Uses the embedded 2nd order solution to estimate errors and adjust the
/// step size. The 3rd order solution is propagated and its derivative at the
/// new point is reused as the first stage of the next step. Arguments and
/// settings are the same as for [`dopri5`](crate::dopri5), except that
/// `scale_max` defaults to `5.0` and `beta` to `0.0`.
pub fn rk23<F, P, S>(
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
            order: 3,
            scale_max: 5.0,
            beta: 0.0,
            stability: 1.5,
        },
    )?;
    let bounds = StepBounds::new(settings, x, xend)?;
    let nmax = max_steps(settings)?;

    // --- Declarations ---
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut yt = vec![0.0; n];
    let mut ye = vec![0.0; n];
    let mut yold = vec![0.0; n];
    let mut k1old = vec![0.0; n];
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let mut reject = false;
    let mut non_finite = false;
    let direction = if xend >= x { 1.0 } else { -1.0 };

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
        Some(h0) => h0.min(bounds.hmax) * direction,
        None => {
            evals.ode += 1;
            hinit(
                f, p, x, y, direction, &k1, &mut k2, &mut k3, 3, bounds.hmax, atol, rtol,
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
        if h.abs() < bounds.floor(x) || h == 0.0 {
            break if non_finite {
                Status::Diverged
            } else {
                Status::StepSizeTooSmall
            };
        }

        // Check for last step adjustment
        let last = (x + 1.01 * h - xend) * direction >= 0.0;
        if last {
            h = xend - x;
        }

        steps.total += 1;

        // Stage 2
        for i in 0..n {
            yt[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &yt, p, &mut k2);

        // Stage 3
        for i in 0..n {
            yt[i] = y[i] + h * A32 * k2[i];
        }
        f.ode(x + C3 * h, &yt, p, &mut k3);

        // 3rd order solution
        for i in 0..n {
            yt[i] = y[i] + h * (B1 * k1[i] + B2 * k2[i] + B3 * k3[i]);
        }

        // Stage 4/1: derivative at new point, also used as k1 if accepted.
        let xph = if last { xend } else { x + h };
        f.ode(xph, &yt, p, &mut k4);
        evals.ode += 3;

        // Error estimate using embedded 2nd order solution
        for i in 0..n {
            ye[i] = h * (E1 * k1[i] + E2 * k2[i] + E3 * k3[i] + E4 * k4[i]);
        }
        let err = error_norm(&ye, y, &yt, atol, rtol);

        non_finite = !all_finite(&yt) || !all_finite(&k4) || !err.is_finite();
        if non_finite {
            steps.rejected += 1;
            trace!("rk23 non-finite trial x = {x}, h = {h:e}");
            h *= ctrl.non_finite();
            reject = true;
            continue;
        }

        if err <= 1.0 {
            // Step accepted
            steps.accepted += 1;
            let fac = ctrl.accepted(err);
            trace!("rk23 accepted x = {xph}, h = {h:e}, err = {err:.3e}");

            // Stage 3 state against the new solution
            for i in 0..n {
                ye[i] = y[i] + h * A32 * k2[i];
            }
            let lambda = lipschitz(&k4, &k3, &yt, &ye);

            yold.copy_from_slice(y);
            k1old.copy_from_slice(&k1);
            y.copy_from_slice(&yt);
            k1.copy_from_slice(&k4);
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
            if reject {
                hnew = hnew.min(h.abs());
                reject = false;
            }
            h = ctrl.stable(hnew, lambda).min(bounds.hmax) * direction;
        } else {
            // Step rejected
            steps.rejected += 1;
            trace!("rk23 rejected x = {x}, h = {h:e}, err = {err:.3e}");
            h *= ctrl.rejected(err);
            reject = true;
        }
    };

    Ok(IntegrationResult::new(x, h, status, evals, steps))
}

// RK23 Butcher tableau coefficients
const C2: Float = 0.5;
const C3: Float = 0.75;

const A21: Float = 0.5;
const A32: Float = 0.75;

const B1: Float = 2.0 / 9.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 4.0 / 9.0;

const E1: Float = 5.0 / 72.0;
const E2: Float = -1.0 / 12.0;
const E3: Float = -1.0 / 9.0;
const E4: Float = 1.0 / 8.0;
