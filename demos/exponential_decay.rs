//! # Example: Exponential Decay
//!
//! Solve the exponential decay equation as a first-order system and sample
//! the continuous solution on a regular grid.
//!
//! Equations:
//! dy/dx = -k y
//!
//! Initial condition: y(0) = 1.0
//!

use pkode::prelude::*;

struct SimpleODE;

impl ODE<f64> for SimpleODE {
    fn ode(&self, _x: f64, y: &[f64], k: &f64, dydx: &mut [f64]) {
        for i in 0..y.len() {
            dydx[i] = -k * y[i];
        }
    }
}

fn main() {
    let problem = Problem::scalar(SimpleODE, 1.0, 1.0, (0.0, 5.0));
    let t_eval: Vec<f64> = (0..=50).map(|i| i as f64 * 0.1).collect();

    let options = Options::builder()
        // Default method is DOPRI5 (Also known as RK45 in SciPy)
        .rel_tol(1e-6)
        .abs_tol(1e-6)
        .build();

    match solve(&problem, options) {
        Ok(sol) => {
            println!("Final status: {:?}", sol.status);
            if let (Some(&t_last), Some(y_last)) = (sol.times().last(), sol.states().last()) {
                println!("Final state: x = {:.5}, y = {:?}", t_last, y_last);
            }
            println!("Number of function evaluations: {}", sol.nfev);
            println!("Number of steps taken: {}", sol.nstep);
            println!("Number of accepted steps: {}", sol.naccpt);
            println!("Number of rejected steps: {}", sol.nrejct);

            // Print sampled values from the dense output
            match sol.at_many(&t_eval) {
                Ok(ys) => {
                    for (ti, yi) in t_eval.iter().zip(ys.iter()) {
                        println!("x = {:.4}, y = {:?}", ti, yi);
                    }
                }
                Err(e) => eprintln!("Evaluation failed: {e}"),
            }
        }
        Err(e) => eprintln!("Integration failed: {e}"),
    }
}
