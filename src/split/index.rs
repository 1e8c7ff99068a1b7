//! Group and label bookkeeping for the fold splitter

use crate::{FoldevalError, Result};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Per-class occurrence counts
///
/// Used globally (whole dataset), per group and per fold. Entry `c` counts
/// the samples whose label maps to class index `c`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelCounts(Vec<usize>);

impl LabelCounts {
    /// Create an all-zero vector for `n_classes` classes
    pub fn zeros(n_classes: usize) -> Self {
        Self(vec![0; n_classes])
    }

    /// Count one more sample of `class`
    pub fn increment(&mut self, class: usize) {
        self.0[class] += 1;
    }

    /// Element-wise add another count vector
    pub fn add(&mut self, other: &LabelCounts) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a += b;
        }
    }

    /// Element-wise subtract a vector previously added with [`LabelCounts::add`]
    pub fn subtract(&mut self, other: &LabelCounts) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a -= b;
        }
    }

    /// Count for a single class
    pub fn get(&self, class: usize) -> usize {
        self.0[class]
    }

    /// Number of classes tracked
    pub fn n_classes(&self) -> usize {
        self.0.len()
    }

    /// Total number of samples counted
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Index of the samples, classes and groups of one dataset
///
/// Classes are the distinct labels in ascending order. Groups are kept in
/// first-appearance order so that an unshuffled split is a pure function of
/// the input order.
#[derive(Clone, Debug)]
pub struct LabelGroupIndex<L, G> {
    classes: Vec<L>,
    groups: Vec<G>,
    sample_class: Vec<usize>,
    sample_group: Vec<usize>,
    group_samples: Vec<Vec<usize>>,
    group_counts: Vec<LabelCounts>,
    totals: LabelCounts,
}

impl<L, G> LabelGroupIndex<L, G>
where
    L: Ord + Clone,
    G: Eq + Hash + Clone,
{
    /// Build the index from parallel label and group sequences
    pub fn build(labels: &[L], groups: &[G]) -> Result<Self> {
        if labels.len() != groups.len() {
            return Err(FoldevalError::configuration(
                format!(
                    "{} labels but {} group identifiers",
                    labels.len(),
                    groups.len()
                ),
                "Every sample needs exactly one label and one group",
            ));
        }
        if labels.is_empty() {
            return Err(FoldevalError::configuration(
                "dataset has no samples",
                "Check the dataset path and column mapping",
            ));
        }

        // One pass over the distinct labels fixes the class order before any counting.
        let class_of: BTreeMap<&L, usize> = labels
            .iter()
            .map(|label| (label, 0))
            .collect::<BTreeMap<_, _>>()
            .into_keys()
            .enumerate()
            .map(|(idx, label)| (label, idx))
            .collect();
        let classes: Vec<L> = class_of.keys().map(|&label| label.clone()).collect();
        let n_classes = classes.len();

        let mut group_of: HashMap<&G, usize> = HashMap::new();
        let mut distinct_groups: Vec<G> = Vec::new();
        for group in groups {
            if !group_of.contains_key(group) {
                group_of.insert(group, distinct_groups.len());
                distinct_groups.push(group.clone());
            }
        }

        let mut group_samples = vec![Vec::new(); distinct_groups.len()];
        let mut group_counts = vec![LabelCounts::zeros(n_classes); distinct_groups.len()];
        let mut totals = LabelCounts::zeros(n_classes);
        let mut sample_class = Vec::with_capacity(labels.len());
        let mut sample_group = Vec::with_capacity(labels.len());

        for (position, (label, group)) in labels.iter().zip(groups).enumerate() {
            let class = class_of[label];
            let g = group_of[group];
            group_samples[g].push(position);
            group_counts[g].increment(class);
            totals.increment(class);
            sample_class.push(class);
            sample_group.push(g);
        }

        Ok(Self {
            classes,
            groups: distinct_groups,
            sample_class,
            sample_group,
            group_samples,
            group_counts,
            totals,
        })
    }

    /// Distinct labels in class-index order
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Distinct groups in first-appearance order
    pub fn groups(&self) -> &[G] {
        &self.groups
    }

    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn n_samples(&self) -> usize {
        self.sample_group.len()
    }

    /// Sample positions belonging to a group
    pub fn samples_of(&self, group: usize) -> &[usize] {
        &self.group_samples[group]
    }

    /// Label counts of a group
    pub fn counts_of(&self, group: usize) -> &LabelCounts {
        &self.group_counts[group]
    }

    /// Group index of the sample at `position`
    pub fn group_of_sample(&self, position: usize) -> usize {
        self.sample_group[position]
    }

    /// Class index of the sample at `position`
    pub fn class_of_sample(&self, position: usize) -> usize {
        self.sample_class[position]
    }

    /// Global label counts
    pub fn totals(&self) -> &LabelCounts {
        &self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_counts_add_subtract() {
        let mut a = LabelCounts::zeros(3);
        a.increment(0);
        a.increment(2);
        let mut b = LabelCounts::zeros(3);
        b.increment(2);

        a.add(&b);
        assert_eq!(a.as_slice(), &[1, 0, 2]);
        a.subtract(&b);
        assert_eq!(a.as_slice(), &[1, 0, 1]);
        assert_eq!(a.total(), 2);
    }

    #[test]
    fn test_index_classes_sorted_groups_in_appearance_order() {
        let labels = ["b", "a", "b", "c", "a"];
        let groups = ["s2", "s1", "s2", "s3", "s1"];
        let index = LabelGroupIndex::build(&labels, &groups).unwrap();

        assert_eq!(index.classes(), &["a", "b", "c"]);
        assert_eq!(index.groups(), &["s2", "s1", "s3"]);
        assert_eq!(index.samples_of(0), &[0, 2]);
        assert_eq!(index.samples_of(1), &[1, 4]);
        assert_eq!(index.counts_of(0).as_slice(), &[0, 2, 0]);
        assert_eq!(index.counts_of(1).as_slice(), &[2, 0, 0]);
        assert_eq!(index.totals().as_slice(), &[2, 2, 1]);
        assert_eq!(index.group_of_sample(3), 2);
        assert_eq!(index.class_of_sample(3), 2);
    }

    #[test]
    fn test_index_rejects_length_mismatch() {
        let err = LabelGroupIndex::build(&["a", "b"], &["g"]).unwrap_err();
        assert!(matches!(err, FoldevalError::Configuration { .. }));
    }

    #[test]
    fn test_index_rejects_empty_input() {
        let labels: [&str; 0] = [];
        let groups: [&str; 0] = [];
        assert!(LabelGroupIndex::build(&labels, &groups).is_err());
    }

    #[test]
    fn test_group_counts_sum_to_totals() {
        let labels = [0, 1, 1, 0, 2, 2, 2];
        let groups = ["x", "y", "x", "z", "y", "z", "z"];
        let index = LabelGroupIndex::build(&labels, &groups).unwrap();

        let mut summed = LabelCounts::zeros(index.n_classes());
        for g in 0..index.n_groups() {
            summed.add(index.counts_of(g));
        }
        assert_eq!(&summed, index.totals());
    }
}
