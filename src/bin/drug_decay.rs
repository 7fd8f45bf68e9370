//! Integrate first-order drug elimination, print a sample table, and report
//! when the amount falls below a threshold.
//!
//! ```text
//! drug_decay --rate 0.2 --dose 0.05 --hours 24 --threshold 0.01
//! drug_decay --csv --points 97 > decay.csv
//! ```

use std::io;

use clap::Parser;
use log::{error, info};
use pkode::{
    export,
    models::{DecayParams, FirstOrderDecay},
    prelude::*,
};

#[derive(Debug, clap::Parser)]
#[command(name = "drug_decay", about = "Solve da/dt = -r a and query the solution")]
pub struct DecayCli {
    /// Elimination rate constant r, per hour.
    #[arg(short = 'r', long, default_value_t = 0.2)]
    pub rate: Float,

    /// Initial amount a0.
    #[arg(short = 'a', long, default_value_t = 0.05)]
    pub dose: Float,

    /// Length of the simulated period in hours.
    #[arg(short = 't', long, default_value_t = 24.0)]
    pub hours: Float,

    /// Amount whose crossing time is reported.
    #[arg(long, default_value_t = 0.01)]
    pub threshold: Float,

    /// Absolute tolerance.
    #[arg(long, default_value_t = 1e-6)]
    pub abs_tol: Float,

    /// Relative tolerance.
    #[arg(long, default_value_t = 1e-3)]
    pub rel_tol: Float,

    /// Use the Bogacki-Shampine 3(2) pair instead of Dormand-Prince 5(4).
    #[arg(long)]
    pub rk23: bool,

    /// Number of evenly spaced points to emit; 0 prints the solver's own steps.
    #[arg(short = 'n', long, default_value_t = 0)]
    pub points: usize,

    /// Write CSV to stdout instead of a table.
    #[arg(long)]
    pub csv: bool,
}

fn main() {
    env_logger::init();
    let args = DecayCli::parse();

    if let Err(err) = run(&args) {
        error!("{err}");
        eprintln!("drug_decay: {err}");
        std::process::exit(1);
    }
}

fn run(args: &DecayCli) -> Result<(), Error> {
    let params = DecayParams { rate: args.rate };
    let problem = Problem::scalar(FirstOrderDecay, args.dose, params, (0.0, args.hours));
    let options = Options::builder()
        .abs_tol(args.abs_tol)
        .rel_tol(args.rel_tol)
        .method(if args.rk23 { Method::RK23 } else { Method::DOPRI5 })
        .build();

    let sol = solve(&problem, options)?;
    info!(
        "{} samples, {} accepted / {} rejected steps, {} evaluations",
        sol.len(),
        sol.naccpt,
        sol.nrejct,
        sol.nfev
    );

    let (times, states) = if args.points > 0 {
        sol.resample(args.points)
    } else {
        (sol.times().to_vec(), sol.states().to_vec())
    };

    if args.csv {
        return export::write_series_csv(&times, &states, &["amount"], io::stdout().lock());
    }

    println!("{:>10}  {:>14}  {:>14}", "t (h)", "a(t)", "exact");
    for (t, a) in times.iter().zip(&states) {
        let exact = FirstOrderDecay::analytic(args.dose, &params, *t);
        println!("{t:>10.4}  {:>14.8e}  {exact:>14.8e}", a[0]);
    }

    match sol.find_crossing(args.threshold, EventDirection::Negative) {
        Ok(t_star) => {
            println!();
            println!("a(t) falls below {} at t = {t_star:.4} h", args.threshold);
            if let Some(exact) = FirstOrderDecay::time_to(args.dose, args.threshold, &params) {
                println!("analytic crossing          t = {exact:.4} h");
            }
        }
        Err(Error::NotFound { .. }) => {
            println!();
            println!("a(t) stays above {} for the whole period", args.threshold);
        }
        Err(err) => return Err(err),
    }

    Ok(())
}
