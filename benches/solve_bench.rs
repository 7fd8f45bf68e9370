use criterion::{Criterion, criterion_group, criterion_main};
use pkode::{
    models::{DecayParams, FirstOrderDecay},
    prelude::*,
};
use std::hint::black_box;

/// Simple harmonic oscillator y'' = -y.
struct SHO;

impl ODE for SHO {
    fn ode(&self, _x: Float, y: &[Float], _p: &(), dydx: &mut [Float]) {
        dydx[0] = y[1];
        dydx[1] = -y[0];
    }
}

fn bench_decay(c: &mut Criterion) {
    let problem = Problem::scalar(FirstOrderDecay, 0.05, DecayParams { rate: 0.2 }, (0.0, 24.0));
    for (name, method) in [("decay_dopri5", Method::DOPRI5), ("decay_rk23", Method::RK23)] {
        let opts = Options::builder().method(method).rel_tol(1e-6).abs_tol(1e-9).build();
        c.bench_function(name, |b| {
            b.iter(|| solve(black_box(&problem), opts.clone()));
        });
    }
}

fn bench_oscillator(c: &mut Criterion) {
    let problem = Problem::new(SHO, [1.0, 0.0], (), (0.0, 20.0));
    for (name, method) in [("sho_dopri5", Method::DOPRI5), ("sho_rk23", Method::RK23)] {
        let opts = Options::builder().method(method).rel_tol(1e-6).abs_tol(1e-9).build();
        c.bench_function(name, |b| {
            b.iter(|| solve(black_box(&problem), opts.clone()));
        });
    }
}

fn bench_queries(c: &mut Criterion) {
    let problem = Problem::scalar(FirstOrderDecay, 0.05, DecayParams { rate: 0.2 }, (0.0, 24.0));
    let sol = solve(&problem, Options::default()).unwrap();
    c.bench_function("dense_output_resample_1000", |b| {
        b.iter(|| sol.resample(black_box(1000)));
    });
    c.bench_function("find_crossing", |b| {
        b.iter(|| sol.find_crossing(black_box(0.01), EventDirection::Negative));
    });
}

criterion_group!(benches, bench_decay, bench_oscillator, bench_queries);
criterion_main!(benches);
