use pkode::prelude::*;

mod common;
use common::{SHO, decay_problem, exact_decay};

#[test]
fn oscillator_dense_output_tracks_cos_and_sin() {
    let x1 = 2.0 * std::f64::consts::PI as Float;
    let problem = Problem::new(SHO, [1.0, 0.0], (), (0.0, x1));
    for method in [Method::DOPRI5, Method::RK23] {
        let opts = Options::builder()
            .method(method)
            .rel_tol(1e-9)
            .abs_tol(1e-9)
            .build();
        let sol = solve(&problem, opts).unwrap();
        assert_eq!(sol.t_span(), (0.0, x1));

        for k in 0..=100 {
            let t = x1 * k as Float / 100.0;
            let y = sol.at(t).unwrap();
            assert!((y[0] - t.cos()).abs() < 1e-5, "{method:?} y0({t}) = {}", y[0]);
            assert!((y[1] + t.sin()).abs() < 1e-5, "{method:?} y1({t}) = {}", y[1]);
        }
    }
}

#[test]
fn hermite_beats_linear_between_samples() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    let (mut hermite_err, mut linear_err): (Float, Float) = (0.0, 0.0);
    for w in sol.times().windows(2) {
        let mid = 0.5 * (w[0] + w[1]);
        let exact = exact_decay(mid);
        let ya = sol.at(w[0]).unwrap()[0];
        let yb = sol.at(w[1]).unwrap()[0];
        hermite_err = hermite_err.max((sol.at(mid).unwrap()[0] - exact).abs());
        linear_err = linear_err.max((0.5 * (ya + yb) - exact).abs());
    }
    assert!(hermite_err < linear_err);
}

#[test]
fn samples_are_parallel_sequences_for_plotting() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    let times = sol.times();
    let values = sol.component(0).unwrap();
    assert_eq!(times.len(), values.len());
    for ((t, y), (&tc, vc)) in sol.iter().zip(times.iter().zip(values)) {
        assert_eq!(t, tc);
        assert_eq!(y[0], vc);
    }
    let collected: Vec<Float> = (&sol).into_iter().map(|(t, _)| t).collect();
    assert_eq!(collected, times);
}

#[test]
fn many_point_evaluation_matches_single_points() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    let ts = [0.0, 0.37, 5.5, 12.0, 23.99, 24.0];
    let many = sol.at_many(&ts).unwrap();
    for (t, y) in ts.iter().zip(many) {
        assert_eq!(y, sol.at(*t).unwrap());
    }
}
