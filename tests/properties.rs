mod common;

use proptest::prelude::*;
use refrac::{
    contamination_ratio, estimate, intervals, ContaminationConfig, ContaminationError,
    OnlineContamination, Recording, Samples, SamplingRate, Seconds, ViolationWindow,
};

const RATE: f64 = 30_000.0;

/// 20-spike train at 30 kHz with `violations` intervals of 20 samples and the
/// rest 10 000 samples apart.
fn train_with_violations(violations: usize) -> Vec<f64> {
    let mut train = vec![0.0];
    for i in 0..19 {
        let step = if i < violations { 20.0 } else { 10_000.0 };
        let last = *train.last().unwrap();
        train.push(last + step);
    }
    train
}

fn ten_seconds() -> Recording {
    Recording::new(SamplingRate::new(RATE).unwrap(), Samples(300_000.0)).unwrap()
}

proptest! {
    #[test]
    fn period_order_rejected_before_anything(
        refractory in 0.0f64..0.01,
        extra in 0.0f64..0.01,
        train in prop::collection::vec(0.0f64..1e6, 0..50),
    ) {
        let censored = refractory + extra;
        let result = contamination_ratio(&train, RATE, 300_000.0, refractory, censored);
        let is_period_order = matches!(result, Err(ContaminationError::PeriodOrder { .. }));
        prop_assert!(is_period_order);
    }

    #[test]
    fn estimate_is_deterministic(
        mut train in prop::collection::vec(0.0f64..300_000.0, 0..200),
    ) {
        train.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let config = ContaminationConfig::default();
        let first = estimate(&train, &ten_seconds(), &config);
        let second = estimate(&train, &ten_seconds(), &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn more_violations_raise_ratio(violations in 0usize..19) {
        let config = ContaminationConfig::default();
        let lower = estimate(&train_with_violations(violations), &ten_seconds(), &config).unwrap();
        let higher = estimate(&train_with_violations(violations + 1), &ten_seconds(), &config).unwrap();

        prop_assert_eq!(lower.violations, violations);
        prop_assert_eq!(higher.violations, violations + 1);
        prop_assert!(higher.ratio > lower.ratio);
    }

    #[test]
    fn no_violations_gives_exact_zero(
        steps in prop::collection::vec(31.0f64..10_000.0, 1..100),
    ) {
        let mut train = vec![0.0];
        for step in steps {
            let last = *train.last().unwrap();
            train.push(last + step);
        }
        let result = estimate(&train, &ten_seconds(), &ContaminationConfig::default()).unwrap();
        prop_assert_eq!(result.violations, 0);
        prop_assert_eq!(result.ratio, 0.0);
    }

    #[test]
    fn interval_count_is_len_minus_one(train in prop::collection::vec(-1e6f64..1e6, 0..100)) {
        prop_assert_eq!(intervals(&train).count(), train.len().saturating_sub(1));
        prop_assert_eq!(intervals(&train).len(), train.len().saturating_sub(1));
    }

    #[test]
    fn window_bounds_are_inclusive(censored in 0i64..1_000, width in 1i64..1_000) {
        let window = ViolationWindow::new(censored, censored + width).unwrap();
        let lo = censored as f64;
        let hi = (censored + width) as f64;

        prop_assert_eq!(window.count_violations(&[0.0, lo]), 1);
        prop_assert_eq!(window.count_violations(&[0.0, hi]), 1);
        prop_assert_eq!(window.count_violations(&[0.0, hi + 1.0]), 0);
        if censored > 0 {
            prop_assert_eq!(window.count_violations(&[0.0, lo - 1.0]), 0);
        }
    }

    #[test]
    fn ratio_stays_in_unit_interval(
        mut train in prop::collection::vec(0.0f64..300_000.0, 2..300),
    ) {
        train.sort_by(|a, b| a.partial_cmp(b).unwrap());
        match estimate(&train, &ten_seconds(), &ContaminationConfig::default()) {
            Ok(result) => {
                prop_assert!(result.ratio >= 0.0);
                prop_assert!(result.ratio <= 1.0);
            }
            Err(err) => {
                let is_excess = matches!(err, ContaminationError::ExcessViolations { .. });
                prop_assert!(is_excess);
            }
        }
    }

    #[test]
    fn online_agrees_with_batch(
        mut train in prop::collection::vec(0.0f64..300_000.0, 0..200),
        split in 0usize..200,
    ) {
        train.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let config = ContaminationConfig::default();
        let rate = SamplingRate::new(RATE).unwrap();

        let split = split.min(train.len());
        let mut acc = OnlineContamination::from_config(&config, rate).unwrap();
        acc.push_batch(&train[..split]);
        acc.push_batch(&train[split..]);

        prop_assert_eq!(acc.estimate(&ten_seconds()), estimate(&train, &ten_seconds(), &config));
    }
}

#[test]
fn degenerate_trains_are_flagged() {
    let config = ContaminationConfig::default();
    for train in [vec![], vec![1_000.0]] {
        let err = estimate(&train, &ten_seconds(), &config).unwrap_err();
        assert_eq!(err, ContaminationError::InsufficientSpikes(train.len()));
    }
}

#[test]
fn typed_and_bare_entry_points_agree() {
    // Physical train in seconds, sampled at 1 kHz
    let seconds = [0.0, 0.002, 0.004, 1.0, 2.5, 3.0];
    let samples = common::to_samples(&seconds, 1_000.0);
    let config = ContaminationConfig::new(Seconds(3.0e-3), Seconds(1.0e-3)).unwrap();

    let typed = estimate(
        &samples,
        &Recording::new(SamplingRate::new(1_000.0).unwrap(), Samples(10_000.0)).unwrap(),
        &config,
    )
    .unwrap();

    let bare = contamination_ratio(
        &samples,
        1_000.0,
        10_000.0,
        config.refractory().get(),
        config.censored().get(),
    )
    .unwrap();

    assert_eq!(typed.violations, 2);
    assert_eq!(typed.ratio, bare);
}
