//! Tuned loops simulated end to end.

use proptest::prelude::*;
use st_controls::{TuningMethod, open_loop, tune};
use st_core::PlantParameters;
use st_sim::{FixedStepSimulator, StepSimulator};

#[test]
fn both_rules_give_stable_tracking_loops() {
    let plant = PlantParameters::new(2.0, 1.0, 4.0);
    let sim = FixedStepSimulator::default();

    for method in TuningMethod::ALL {
        let tuning = tune(method, &plant).expect("plant is tunable");
        let open = open_loop(&tuning, plant.tau).unwrap();
        let result = sim
            .simulate_unity_feedback_step(&open)
            .unwrap_or_else(|e| panic!("{method}: {e}"));

        let last = *result.response.last().unwrap();
        assert!((last - 1.0).abs() < 0.02, "{method}: final value {last}");
        assert!(result.rise_time().is_some(), "{method}: no rise time");
        assert!(result.settling_time().is_some(), "{method}: never settled");
        assert!(result.overshoot() >= 0.0);
    }
}

#[test]
fn degenerate_plant_never_reaches_simulation() {
    let plant = PlantParameters::new(2.0, 0.0, 4.0);
    for method in TuningMethod::ALL {
        assert!(tune(method, &plant).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn positive_plants_close_with_unit_gain(
        k in 0.1_f64..10.0,
        theta in 0.1_f64..10.0,
        tau in 0.1_f64..10.0,
    ) {
        let plant = PlantParameters::new(k, theta, tau);
        for method in TuningMethod::ALL {
            let tuning = tune(method, &plant).unwrap();
            let closed = open_loop(&tuning, tau).unwrap().feedback_unity().unwrap();
            let dc = closed.dc_gain().unwrap();
            prop_assert!((dc - 1.0).abs() < 1e-9);
            // Second order with positive coefficients: both poles in the left half-plane.
            prop_assert!(closed.poles().iter().all(|p| p.re < 0.0));
        }
    }
}
