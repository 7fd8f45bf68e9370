use approx::assert_relative_eq;
use pkode::{
    models::{DecayParams, FirstOrderDecay},
    prelude::*,
};

mod common;
use common::{DOSE, RATE, decay_problem, exact_decay, tight_opts};

#[test]
fn value_after_six_minutes_matches_closed_form() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    let a = sol.at(0.1).unwrap()[0];
    assert!((a - 0.049009933).abs() < 1e-6, "a(0.1) = {a}");
    assert!((a - exact_decay(0.1)).abs() < 1e-6);
}

#[test]
fn both_methods_track_closed_form_everywhere() {
    for method in [Method::DOPRI5, Method::RK23] {
        let sol = solve(&decay_problem(), tight_opts(method)).unwrap();
        for k in 0..=240 {
            let t = k as Float * 0.1;
            let a = sol.at(t).unwrap()[0];
            assert_relative_eq!(a, exact_decay(t), max_relative = 1e-6);
        }
    }
}

#[test]
fn endpoints_are_exact() {
    let problem = decay_problem();
    let sol = solve(&problem, Options::default()).unwrap();
    assert_eq!(sol.t_span(), (0.0, 24.0));
    assert_eq!(sol.at(0.0).unwrap(), problem.y0);
    assert_eq!(sol.at(24.0).unwrap(), *sol.states().last().unwrap());
}

#[test]
fn sample_times_strictly_increase() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    assert!(sol.len() > 2);
    assert!(sol.times().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(sol.naccpt + 1, sol.len());
}

#[test]
fn amount_never_increases() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    let samples = sol.component(0).unwrap();
    assert!(samples.windows(2).all(|w| w[1] < w[0]));

    let (_, dense) = sol.resample(2401);
    assert!(dense.windows(2).all(|w| w[1][0] <= w[0][0]));
}

#[test]
fn default_tolerances_keep_long_decay_monotone() {
    let cases = [(0.2, 0.05, 200.0), (1.0, 1.0, 50.0), (0.05, 2.0, 400.0)];
    for (rate, dose, t1) in cases {
        let problem = Problem::scalar(FirstOrderDecay, dose, DecayParams { rate }, (0.0, t1));
        for method in [Method::DOPRI5, Method::RK23] {
            let opts = Options::builder().method(method).build();
            let sol = solve(&problem, opts).unwrap();
            let values = sol.component(0).unwrap();
            for w in values.windows(2) {
                assert!(w[1] < w[0], "{method:?} r = {rate}: {} -> {}", w[0], w[1]);
            }
            let (_, dense) = sol.resample(5000);
            for w in dense.windows(2) {
                assert!(w[1][0] <= w[0][0], "{method:?} r = {rate}: {} -> {}", w[0][0], w[1][0]);
            }
            assert!(*values.last().unwrap() > 0.0);
        }
    }
}

#[test]
fn solving_twice_is_deterministic() {
    let problem = decay_problem();
    let first = solve(&problem, Options::default()).unwrap();
    let second = solve(&problem, Options::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn threshold_crossing_near_eight_hours() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    let t_star = sol.find_crossing(0.01, EventDirection::Negative).unwrap();

    let exact = (5.0 as Float).ln() / RATE;
    assert!((t_star - exact).abs() < 1e-2, "t* = {t_star}, exact = {exact}");
    assert!(t_star > 6.05 && t_star < 8.34);
    assert!((sol.at(t_star).unwrap()[0] - 0.01).abs() <= 1e-8);

    // The refined time lies inside a sampled bracket.
    let t = sol.times();
    assert!(t.windows(2).any(|w| w[0] < t_star && t_star < w[1]));
}

#[test]
fn threshold_crossing_is_accurate_with_tight_tolerances() {
    let sol = solve(&decay_problem(), tight_opts(Method::DOPRI5)).unwrap();
    let opts = CrossingOptions::builder().tol(1e-13).build();
    let t_star = sol.find_crossing_with(0.01, &opts).unwrap();
    let exact = FirstOrderDecay::time_to(DOSE, 0.01, &DecayParams { rate: RATE }).unwrap();
    assert_relative_eq!(t_star, exact, max_relative = 1e-7);
}

#[test]
fn threshold_never_reached_is_not_found() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    assert_eq!(
        sol.find_crossing(1e-5, EventDirection::Negative),
        Err(Error::NotFound { threshold: 1e-5 })
    );
    // A decaying amount never rises through a level.
    assert!(matches!(
        sol.find_crossing(0.01, EventDirection::Positive),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn queries_outside_span_fail() {
    let sol = solve(&decay_problem(), Options::default()).unwrap();
    assert_eq!(
        sol.at(-0.1),
        Err(Error::OutOfRange {
            t: -0.1,
            t0: 0.0,
            t1: 24.0
        })
    );
    assert!(matches!(sol.at(24.1), Err(Error::OutOfRange { .. })));
    assert!(sol.at_many(&[1.0, 25.0]).is_err());
}

#[test]
fn degenerate_span_is_one_sample() {
    let problem = Problem::scalar(FirstOrderDecay, DOSE, DecayParams { rate: RATE }, (3.0, 3.0));
    let sol = solve(&problem, Options::default()).unwrap();
    assert_eq!(sol.len(), 1);
    assert_eq!(sol.iter().next(), Some((3.0, &[DOSE][..])));
    assert_eq!(sol.at(3.0).unwrap(), vec![DOSE]);
    assert!(matches!(sol.at(3.5), Err(Error::OutOfRange { .. })));
}

#[test]
fn vector_state_decays_componentwise() {
    let problem = Problem::new(
        FirstOrderDecay,
        [DOSE, 2.0 * DOSE],
        DecayParams { rate: RATE },
        (0.0, 10.0),
    );
    let sol = solve(&problem, tight_opts(Method::DOPRI5)).unwrap();
    let y = sol.at(5.0).unwrap();
    assert_relative_eq!(y[0], exact_decay(5.0), max_relative = 1e-7);
    assert_relative_eq!(y[1], 2.0 * exact_decay(5.0), max_relative = 1e-7);

    let opts = CrossingOptions::builder()
        .component(1)
        .direction(EventDirection::Negative)
        .build();
    let t_star = sol.find_crossing_with(DOSE, &opts).unwrap();
    assert_relative_eq!(t_star, (2.0 as Float).ln() / RATE, max_relative = 1e-6);
}

#[test]
fn parameters_are_passed_explicitly() {
    // Same right-hand side, two parameter sets, no shared state.
    let slow = Problem::scalar(FirstOrderDecay, 1.0, DecayParams { rate: 0.1 }, (0.0, 1.0));
    let fast = Problem::scalar(FirstOrderDecay, 1.0, DecayParams { rate: 1.0 }, (0.0, 1.0));
    let a_slow = solve(&slow, Options::default()).unwrap().at(1.0).unwrap()[0];
    let a_fast = solve(&fast, Options::default()).unwrap().at(1.0).unwrap()[0];
    assert_relative_eq!(a_slow, (-0.1 as Float).exp(), max_relative = 1e-3);
    assert_relative_eq!(a_fast, (-1.0 as Float).exp(), max_relative = 1e-3);
}

#[test]
fn closure_right_hand_side() {
    let rhs = |_t: Float, y: &[Float], r: &Float, dydt: &mut [Float]| dydt[0] = -r * y[0];
    let problem = Problem::scalar(rhs, DOSE, RATE, (0.0, 24.0));
    let sol = solve(&problem, Options::default()).unwrap();
    assert!((sol.at(0.1).unwrap()[0] - exact_decay(0.1)).abs() < 1e-6);
}
