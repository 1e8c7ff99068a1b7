//! Grouped stratified k-fold splitter
//!
//! Whole groups are assigned to folds one at a time. Each group goes to the
//! fold that leaves the per-class fold shares with the lowest mean standard
//! deviation, so every fold's label distribution tracks the global one even
//! when samples must stay together.

use super::index::{LabelCounts, LabelGroupIndex};
use super::regression::pseudo_labels;
use crate::{FoldevalError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::hash::Hash;

/// Scores closer than this are treated as ties
const SCORE_TOLERANCE: f64 = 1e-12;

/// Train/test positions of one fold
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fold {
    /// Fold index in `0..n_splits`
    pub index: usize,
    /// Positions used for training (ascending)
    pub train: Vec<usize>,
    /// Positions held out for testing (ascending)
    pub test: Vec<usize>,
}

/// Result of assigning every group to a fold
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldAssignment {
    fold_of_group: Vec<usize>,
    fold_groups: Vec<Vec<usize>>,
    fold_counts: Vec<LabelCounts>,
}

impl FoldAssignment {
    /// Fold that received group `group`
    pub fn fold_of(&self, group: usize) -> usize {
        self.fold_of_group[group]
    }

    /// Groups assigned to a fold, in assignment order
    pub fn groups_in(&self, fold: usize) -> &[usize] {
        &self.fold_groups[fold]
    }

    /// Label counts accumulated in a fold
    pub fn counts_in(&self, fold: usize) -> &LabelCounts {
        &self.fold_counts[fold]
    }

    pub fn n_folds(&self) -> usize {
        self.fold_groups.len()
    }

    /// Imbalance score of the final assignment
    pub fn imbalance(&self, totals: &LabelCounts) -> f64 {
        imbalance(&self.fold_counts, totals)
    }

    /// Expand the group assignment into train/test positions
    pub fn folds<L, G>(&self, index: &LabelGroupIndex<L, G>) -> Vec<Fold>
    where
        L: Ord + Clone,
        G: Eq + Hash + Clone,
    {
        (0..self.n_folds())
            .map(|fold| {
                let (test, train): (Vec<usize>, Vec<usize>) = (0..index.n_samples())
                    .partition(|&pos| self.fold_of_group[index.group_of_sample(pos)] == fold);
                Fold {
                    index: fold,
                    train,
                    test,
                }
            })
            .collect()
    }
}

/// Grouped stratified K-Fold splitter
#[derive(Clone, Debug)]
pub struct StratifiedGroupKFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl StratifiedGroupKFold {
    /// Create a new splitter; groups are visited in input order by default
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            seed: 42,
        }
    }

    /// Set random seed for shuffling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable group shuffling before assignment
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Split samples into folds, keeping each group inside a single fold
    ///
    /// `groups` defaults to `samples`, which reduces to a plain stratified split.
    pub fn split<K, L>(&self, samples: &[K], labels: &[L], groups: Option<&[K]>) -> Result<Vec<Fold>>
    where
        K: Eq + Hash + Clone,
        L: Ord + Clone,
    {
        if samples.len() != labels.len() {
            return Err(FoldevalError::configuration(
                format!("{} samples but {} labels", samples.len(), labels.len()),
                "Pass one label per sample",
            ));
        }
        let groups = groups.unwrap_or(samples);
        let index = LabelGroupIndex::build(labels, groups)?;
        Ok(self.assignment(&index)?.folds(&index))
    }

    /// Assign groups using the configured order: seeded shuffle or input order
    pub fn assignment<L, G>(&self, index: &LabelGroupIndex<L, G>) -> Result<FoldAssignment>
    where
        L: Ord + Clone,
        G: Eq + Hash + Clone,
    {
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            self.assign_with_rng(index, &mut rng)
        } else {
            self.assign(index)
        }
    }

    /// Classification split: labels are literal class names
    pub fn split_classes<K, L>(
        &self,
        samples: &[K],
        labels: &[L],
        groups: Option<&[K]>,
    ) -> Result<Vec<Fold>>
    where
        K: Eq + Hash + Clone,
        L: Ord + Clone,
    {
        let mut distinct: Vec<&L> = labels.iter().collect();
        distinct.sort();
        distinct.dedup();
        check_class_count(distinct.len())?;
        self.split(samples, labels, groups)
    }

    /// Regression split: targets are bucketed into ten pseudo-classes first
    pub fn split_targets<K>(
        &self,
        samples: &[K],
        targets: &[f64],
        groups: Option<&[K]>,
    ) -> Result<Vec<Fold>>
    where
        K: Eq + Hash + Clone,
    {
        let buckets = pseudo_labels(targets)?;
        self.split(samples, &buckets, groups)
    }

    /// Assign groups in first-appearance order
    pub fn assign<L, G>(&self, index: &LabelGroupIndex<L, G>) -> Result<FoldAssignment>
    where
        L: Ord + Clone,
        G: Eq + Hash + Clone,
    {
        let order: Vec<usize> = (0..index.n_groups()).collect();
        self.assign_in_order(index, &order)
    }

    /// Shuffle the groups with `rng`, then assign them
    pub fn assign_with_rng<L, G, R>(
        &self,
        index: &LabelGroupIndex<L, G>,
        rng: &mut R,
    ) -> Result<FoldAssignment>
    where
        L: Ord + Clone,
        G: Eq + Hash + Clone,
        R: Rng + ?Sized,
    {
        let mut order: Vec<usize> = (0..index.n_groups()).collect();
        order.shuffle(rng);
        self.assign_in_order(index, &order)
    }

    fn assign_in_order<L, G>(
        &self,
        index: &LabelGroupIndex<L, G>,
        order: &[usize],
    ) -> Result<FoldAssignment>
    where
        L: Ord + Clone,
        G: Eq + Hash + Clone,
    {
        self.check_group_count(index.n_groups())?;

        let n_classes = index.n_classes();
        let totals = index.totals();
        let mut fold_counts = vec![LabelCounts::zeros(n_classes); self.n_splits];
        let mut fold_groups = vec![Vec::new(); self.n_splits];
        let mut fold_of_group = vec![0; index.n_groups()];

        tracing::debug!(
            groups = index.n_groups(),
            classes = n_classes,
            folds = self.n_splits,
            "assigning groups to folds"
        );

        for &group in order {
            let counts = index.counts_of(group);

            // Fold 0 seeds the best score. A later fold wins when its score is
            // strictly lower, or equal with fewer samples; otherwise the earlier
            // fold keeps the group.
            let mut best_fold = 0;
            let mut best_score = f64::INFINITY;
            for fold in 0..self.n_splits {
                fold_counts[fold].add(counts);
                let score = imbalance(&fold_counts, totals);
                fold_counts[fold].subtract(counts);

                let better = fold == 0
                    || score < best_score - SCORE_TOLERANCE
                    || ((score - best_score).abs() <= SCORE_TOLERANCE
                        && fold_counts[fold].total() < fold_counts[best_fold].total());
                if better {
                    best_score = score;
                    best_fold = fold;
                }
            }
            tracing::trace!(group, fold = best_fold, score = best_score, "group assigned");

            fold_counts[best_fold].add(counts);
            fold_groups[best_fold].push(group);
            fold_of_group[group] = best_fold;
        }

        Ok(FoldAssignment {
            fold_of_group,
            fold_groups,
            fold_counts,
        })
    }

    fn check_group_count(&self, n_groups: usize) -> Result<()> {
        if self.n_splits < 2 {
            return Err(FoldevalError::configuration(
                format!("n_splits={} is too small", self.n_splits),
                "Use at least 2 folds",
            ));
        }
        if self.n_splits > n_groups {
            return Err(FoldevalError::configuration(
                format!(
                    "n_splits={} exceeds the {} distinct groups, some folds would be empty",
                    self.n_splits, n_groups
                ),
                format!("Lower n_splits to at most {n_groups}"),
            ));
        }
        Ok(())
    }
}

/// Classification needs at least two distinct labels
pub fn check_class_count(n_classes: usize) -> Result<()> {
    if n_classes < 2 {
        return Err(FoldevalError::configuration(
            format!("label column has {n_classes} distinct value(s), classification needs at least 2"),
            "Check the label column mapping or switch the task mode to regression",
        ));
    }
    Ok(())
}

/// Mean over classes of the standard deviation of per-fold class shares
///
/// A class's share in a fold is the fold's count divided by the class's
/// global count. The deviation is the population one (divisor `k`).
pub fn imbalance(fold_counts: &[LabelCounts], totals: &LabelCounts) -> f64 {
    let n_classes = totals.n_classes();
    if n_classes == 0 || fold_counts.is_empty() {
        return 0.0;
    }
    let k = fold_counts.len() as f64;

    let std_sum: f64 = (0..n_classes)
        .map(|class| {
            let total = totals.get(class) as f64;
            let shares: Vec<f64> = fold_counts
                .iter()
                .map(|counts| counts.get(class) as f64 / total)
                .collect();
            let mean = shares.iter().sum::<f64>() / k;
            let variance = shares.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / k;
            variance.sqrt()
        })
        .sum();

    std_sum / n_classes as f64
}
