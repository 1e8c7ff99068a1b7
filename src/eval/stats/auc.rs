//! ROC curve and area under it

use super::{z_value, Estimate};
use crate::{FoldevalError, Result};
use serde::Serialize;
use std::cmp::Ordering;

/// One point of a ROC curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
    /// Samples scoring at or above this value are called positive
    pub threshold: f64,
}

fn class_sizes(scores: &[f64], positive: &[bool]) -> Result<(usize, usize)> {
    if scores.len() != positive.len() {
        return Err(FoldevalError::configuration(
            format!("{} scores but {} labels", scores.len(), positive.len()),
            "Pass one label per score",
        ));
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(FoldevalError::degenerate("scores contain NaN or infinite values"));
    }
    let n_pos = positive.iter().filter(|&&p| p).count();
    let n_neg = positive.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(FoldevalError::degenerate(format!(
            "only one class present ({n_pos} positives, {n_neg} negatives)"
        )));
    }
    Ok((n_pos, n_neg))
}

/// Area under the ROC curve (Mann–Whitney U / (n1·n2), ties count one half)
///
/// Undefined when only one class is present or every score is identical.
pub fn roc_auc(scores: &[f64], positive: &[bool]) -> Result<f64> {
    let (n_pos, n_neg) = class_sizes(scores, positive)?;
    if scores.windows(2).all(|w| w[0] == w[1]) {
        return Err(FoldevalError::degenerate("all scores are identical"));
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    // Average 1-based ranks over runs of tied scores
    let mut ranks = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        let rank = (start + end + 1) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }

    let rank_sum: f64 = ranks
        .iter()
        .zip(positive)
        .filter(|&(_, &p)| p)
        .map(|(r, _)| r)
        .sum();
    let n1 = n_pos as f64;
    let u = rank_sum - n1 * (n1 + 1.0) / 2.0;
    Ok(u / (n1 * n_neg as f64))
}

/// ROC points at every distinct score threshold, starting at (0, 0)
pub fn roc_curve(scores: &[f64], positive: &[bool]) -> Result<Vec<RocPoint>> {
    let (n_pos, n_neg) = class_sizes(scores, positive)?;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| match scores[b].total_cmp(&scores[a]) {
        Ordering::Equal => a.cmp(&b),
        other => other,
    });

    let mut points = vec![RocPoint {
        fpr: 0.0,
        tpr: 0.0,
        threshold: f64::INFINITY,
    }];
    let (mut tp, mut fp) = (0usize, 0usize);
    for (rank, &i) in order.iter().enumerate() {
        if positive[i] {
            tp += 1;
        } else {
            fp += 1;
        }
        let last_of_threshold = order
            .get(rank + 1)
            .map_or(true, |&next| scores[next] != scores[i]);
        if last_of_threshold {
            points.push(RocPoint {
                fpr: fp as f64 / n_neg as f64,
                tpr: tp as f64 / n_pos as f64,
                threshold: scores[i],
            });
        }
    }
    Ok(points)
}

/// Hanley–McNeil standard error of an AUC estimate
///
/// `n_pos` and `n_neg` are the positive and negative sample counts.
pub fn hanley_mcneil_se(auc: f64, n_pos: usize, n_neg: usize) -> f64 {
    let n1 = n_pos as f64;
    let n2 = n_neg as f64;
    let q1 = auc / (2.0 - auc);
    let q2 = 2.0 * auc * auc / (1.0 + auc);
    let auc2 = auc * auc;
    let variance =
        (auc * (1.0 - auc) + (n1 - 1.0) * (q1 - auc2) + (n2 - 1.0) * (q2 - auc2)) / (n1 * n2);
    variance.max(0.0).sqrt()
}

/// AUC ± z·SE, clamped to [0, 1]
pub fn auc_confidence_interval(
    auc: f64,
    n_pos: usize,
    n_neg: usize,
    confidence: f64,
) -> Result<Estimate> {
    if n_pos == 0 || n_neg == 0 {
        return Err(FoldevalError::degenerate(
            "AUC interval needs at least one positive and one negative",
        ));
    }
    let z = z_value(confidence)?;
    let se = hanley_mcneil_se(auc, n_pos, n_neg);
    Ok(Estimate::new(
        auc,
        (auc - z * se).clamp(0.0, 1.0),
        (auc + z * se).clamp(0.0, 1.0),
    ))
}

/// AUC of `scores` with its Hanley–McNeil interval
pub fn roc_auc_ci(scores: &[f64], positive: &[bool], confidence: f64) -> Result<Estimate> {
    let auc = roc_auc(scores, positive)?;
    let n_pos = positive.iter().filter(|&&p| p).count();
    auc_confidence_interval(auc, n_pos, positive.len() - n_pos, confidence)
}
