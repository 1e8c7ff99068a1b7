//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;
use std::path::PathBuf;

fn arb_mode() -> impl Strategy<Value = TaskMode> {
    prop_oneof![
        Just(TaskMode::Binary),
        Just(TaskMode::Categorical),
        Just(TaskMode::Regression),
    ]
}

fn arb_valid_spec() -> impl Strategy<Value = RunSpec> {
    (
        2usize..50,    // n_splits
        0.01f64..0.99, // alpha
        any::<bool>(), // shuffle
        any::<u64>(),  // seed
        arb_mode(),
    )
        .prop_map(|(n_splits, alpha, shuffle, seed, mode)| RunSpec {
            dataset: DatasetSpec {
                path: PathBuf::from("labels.csv"),
                columns: ColumnMap::default(),
            },
            task: TaskSpec { mode, alpha, positive_class: None },
            split: SplitSpec { n_splits, shuffle, seed, ..Default::default() },
            summary: SummarySpec::default(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_small_split_count_fails(spec in arb_valid_spec(), n in 0usize..2) {
        let mut spec = spec;
        spec.split.n_splits = n;
        prop_assert_eq!(validate_config(&spec), Err(ValidationError::InvalidSplitCount(n)));
    }

    #[test]
    fn prop_alpha_at_or_above_one_fails(spec in arb_valid_spec(), alpha in 1.0f64..10.0) {
        let mut spec = spec;
        spec.task.alpha = alpha;
        prop_assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidAlpha(_))));
    }
}
