//! Property tests for grouped stratified splitting
//!
//! Ensures every split satisfies the partition invariants:
//! - Test sets cover every sample exactly once
//! - Train and test are complements within a fold
//! - A group never straddles two folds
//! - Per-class counts summed over folds equal the global counts
//! - Output depends only on input order, or on the seed when shuffling

use foldeval::split::{LabelCounts, LabelGroupIndex, StratifiedGroupKFold};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// =============================================================================
// Strategy Helpers
// =============================================================================

/// (labels, groups, k): 2..16 groups of 1..6 samples, labels in 0..4
fn grouped_dataset() -> impl Strategy<Value = (Vec<usize>, Vec<String>, usize)> {
    vec(1usize..6, 2..16)
        .prop_flat_map(|sizes| {
            let n: usize = sizes.iter().sum();
            let n_groups = sizes.len();
            (Just(sizes), vec(0usize..4, n), 2..=n_groups)
        })
        .prop_map(|(sizes, labels, k)| {
            let groups = sizes
                .iter()
                .enumerate()
                .flat_map(|(g, &size)| std::iter::repeat(format!("g{g}")).take(size))
                .collect();
            (labels, groups, k)
        })
}

// =============================================================================
// Partition Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_partition_complete_and_disjoint((labels, groups, k) in grouped_dataset()) {
        let folds = StratifiedGroupKFold::new(k)
            .split(&groups, &labels, Some(groups.as_slice()))
            .unwrap();
        prop_assert_eq!(folds.len(), k);

        let mut seen = vec![0usize; labels.len()];
        for fold in &folds {
            for &p in &fold.test {
                seen[p] += 1;
            }
            let test: HashSet<usize> = fold.test.iter().copied().collect();
            let train: HashSet<usize> = fold.train.iter().copied().collect();
            prop_assert!(test.is_disjoint(&train));
            prop_assert_eq!(test.len() + train.len(), labels.len());
        }
        prop_assert!(seen.iter().all(|&c| c == 1), "test coverage {:?}", seen);
    }

    #[test]
    fn prop_groups_stay_whole((labels, groups, k) in grouped_dataset(), seed in any::<u64>()) {
        let folds = StratifiedGroupKFold::new(k)
            .with_shuffle(true)
            .with_seed(seed)
            .split(&groups, &labels, Some(groups.as_slice()))
            .unwrap();

        let mut fold_of_group: HashMap<&str, usize> = HashMap::new();
        for fold in &folds {
            for &p in &fold.test {
                let previous = fold_of_group.insert(groups[p].as_str(), fold.index);
                prop_assert!(previous.map_or(true, |f| f == fold.index));
            }
        }
    }

    #[test]
    fn prop_label_counts_conserved((labels, groups, k) in grouped_dataset()) {
        let index = LabelGroupIndex::build(&labels, &groups).unwrap();
        let assignment = StratifiedGroupKFold::new(k).assign(&index).unwrap();

        let mut summed = LabelCounts::zeros(index.n_classes());
        for fold in 0..assignment.n_folds() {
            summed.add(assignment.counts_in(fold));
        }
        prop_assert_eq!(&summed, index.totals());
    }

    #[test]
    fn prop_unshuffled_is_deterministic((labels, groups, k) in grouped_dataset()) {
        let splitter = StratifiedGroupKFold::new(k);
        let a = splitter.split(&groups, &labels, Some(groups.as_slice())).unwrap();
        let b = splitter.split(&groups, &labels, Some(groups.as_slice())).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_seed_determines_shuffle((labels, groups, k) in grouped_dataset(), seed in any::<u64>()) {
        let split = || {
            StratifiedGroupKFold::new(k)
                .with_shuffle(true)
                .with_seed(seed)
                .split(&groups, &labels, Some(groups.as_slice()))
                .unwrap()
        };
        prop_assert_eq!(split(), split());
    }

    #[test]
    fn prop_too_many_folds_rejected((labels, groups, _k) in grouped_dataset(), extra in 1usize..4) {
        let n_groups = groups.iter().collect::<HashSet<_>>().len();
        let result = StratifiedGroupKFold::new(n_groups + extra)
            .split(&groups, &labels, Some(groups.as_slice()));
        prop_assert!(result.is_err());
    }
}
