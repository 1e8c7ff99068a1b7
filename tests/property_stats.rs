//! Property tests for the interval estimates
//!
//! - Clopper–Pearson bounds lie in [0, 1], contain the point estimate and
//!   move monotonically with the success count
//! - AUC lies in [0, 1], flips to 1 - AUC when the labels flip, and its
//!   Hanley–McNeil interval contains it

use foldeval::eval::{auc_confidence_interval, clopper_pearson, roc_auc, roc_auc_ci};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Scores and labels with at least one of each class and two distinct scores
fn scored_labels() -> impl Strategy<Value = (Vec<f64>, Vec<bool>)> {
    (2usize..60)
        .prop_flat_map(|n| (vec(0.0f64..1.0, n), vec(any::<bool>(), n)))
        .prop_map(|(scores, mut labels)| {
            labels[0] = true;
            labels[1] = false;
            (scores, labels)
        })
        .prop_filter("scores must not all be identical", |(scores, _)| {
            scores.windows(2).any(|w| w[0] != w[1])
        })
}

// =============================================================================
// Clopper–Pearson Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_clopper_pearson_bounded(n in 1usize..200, frac in 0.0f64..=1.0, conf in 0.5f64..0.999) {
        let k = ((n as f64) * frac).round() as usize;
        let e = clopper_pearson(k, n, conf).unwrap();

        prop_assert!(0.0 <= e.lower && e.lower <= e.point);
        prop_assert!(e.point <= e.upper && e.upper <= 1.0);
        if k == 0 {
            prop_assert_eq!(e.lower, 0.0);
        }
        if k == n {
            prop_assert_eq!(e.upper, 1.0);
        }
    }

    #[test]
    fn prop_clopper_pearson_rare_events_contain_point(n in 1_000usize..2_000_000, k in 0usize..4) {
        let e = clopper_pearson(k, n, 0.95).unwrap();
        prop_assert!(e.contains(e.point), "{} outside {}", e.point, e);
        prop_assert!(e.upper > e.lower);
    }

    #[test]
    fn prop_clopper_pearson_monotone_in_successes(n in 2usize..120, frac in 0.0f64..1.0) {
        let k = (((n - 1) as f64) * frac).floor() as usize;
        let a = clopper_pearson(k, n, 0.95).unwrap();
        let b = clopper_pearson(k + 1, n, 0.95).unwrap();

        prop_assert!(a.lower <= b.lower, "lower {} > {}", a.lower, b.lower);
        prop_assert!(a.upper <= b.upper, "upper {} > {}", a.upper, b.upper);
    }

    // -------------------------------------------------------------------------
    // AUC Properties
    // -------------------------------------------------------------------------

    #[test]
    fn prop_auc_bounded_and_ci_contains((scores, labels) in scored_labels()) {
        let e = roc_auc_ci(&scores, &labels, 0.95).unwrap();
        prop_assert!((0.0..=1.0).contains(&e.point));
        prop_assert!(0.0 <= e.lower && e.lower <= e.point);
        prop_assert!(e.point <= e.upper && e.upper <= 1.0);
    }

    #[test]
    fn prop_auc_flips_with_labels((scores, labels) in scored_labels()) {
        let flipped: Vec<bool> = labels.iter().map(|l| !l).collect();
        let a = roc_auc(&scores, &labels).unwrap();
        let b = roc_auc(&scores, &flipped).unwrap();
        prop_assert!((a + b - 1.0).abs() < 1e-9, "{} + {} != 1", a, b);
    }

    #[test]
    fn prop_larger_samples_narrow_auc_ci(auc in 0.55f64..0.98, n in 3usize..40) {
        let small = auc_confidence_interval(auc, n, n, 0.95).unwrap();
        let large = auc_confidence_interval(auc, n * 10, n * 10, 0.95).unwrap();
        prop_assert!(large.width() <= small.width());
    }
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_auc_ci_fifty_narrower_than_five() {
    let five = auc_confidence_interval(0.9, 5, 5, 0.95).unwrap();
    let fifty = auc_confidence_interval(0.9, 50, 50, 0.95).unwrap();
    assert!(fifty.width() < five.width());
}

#[test]
fn test_clopper_pearson_seven_of_ten() {
    let e = clopper_pearson(7, 10, 0.95).unwrap();
    assert!((e.point - 0.7).abs() < 1e-12);
    assert!(0.0 <= e.lower && e.lower < 0.7);
    assert!(0.7 < e.upper && e.upper <= 1.0);
}
