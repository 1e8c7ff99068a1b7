//! Pseudo-labels for stratifying continuous targets

use crate::{FoldevalError, Result};

/// Number of equal-width buckets used for regression targets
pub const N_BUCKETS: usize = 10;

/// Bucket each target into one of [`N_BUCKETS`] equal-width bins over `[min, max]`
///
/// Thresholds ascend as `min + i * (max - min) / 10` for `i = 1..=10`, and a
/// value takes the first bucket whose threshold it lies strictly below. The
/// last bucket is closed on the right, so `max` lands in bucket 9. A constant
/// target puts every sample in bucket 0.
pub fn pseudo_labels(targets: &[f64]) -> Result<Vec<usize>> {
    if let Some(bad) = targets.iter().find(|t| !t.is_finite()) {
        return Err(FoldevalError::configuration(
            format!("regression target {bad} is not a finite number"),
            "Remove or fix rows with missing or infinite targets",
        ));
    }
    let Some(min) = targets.iter().copied().reduce(f64::min) else {
        return Ok(Vec::new());
    };
    let max = targets.iter().copied().fold(min, f64::max);
    let width = (max - min) / N_BUCKETS as f64;

    if width == 0.0 {
        return Ok(vec![0; targets.len()]);
    }

    let thresholds: Vec<f64> = (1..=N_BUCKETS).map(|i| min + i as f64 * width).collect();
    Ok(targets
        .iter()
        .map(|&t| {
            thresholds
                .iter()
                .position(|&threshold| t < threshold)
                .unwrap_or(N_BUCKETS - 1)
        })
        .collect())
}
