//! Clopper–Pearson exact binomial interval

use super::{check_confidence, Estimate};
use crate::{FoldevalError, Result};
use statrs::function::beta::inv_beta_reg;

/// Proportion `successes / trials` with its Clopper–Pearson interval
///
/// lower = Beta(k, n-k+1) quantile at (1-confidence)/2,
/// upper = Beta(k+1, n-k) quantile at (1+confidence)/2.
/// `k = 0` pins the lower bound to 0 and `k = n` the upper bound to 1.
pub fn clopper_pearson(successes: usize, trials: usize, confidence: f64) -> Result<Estimate> {
    check_confidence(confidence)?;
    if trials == 0 {
        return Err(FoldevalError::insufficient_data("a proportion with zero trials"));
    }
    if successes > trials {
        return Err(FoldevalError::configuration(
            format!("{successes} successes out of {trials} trials"),
            "Successes cannot exceed trials",
        ));
    }

    let k = successes as f64;
    let n = trials as f64;
    let tail = (1.0 - confidence) / 2.0;

    let lower = if successes == 0 {
        0.0
    } else {
        beta_quantile(k, n - k + 1.0, tail)?
    };
    let upper = if successes == trials {
        1.0
    } else {
        beta_quantile(k + 1.0, n - k, 1.0 - tail)?
    };

    Ok(Estimate::new(k / n, lower, upper))
}

/// Quantile of Beta(a, b) through the inverse regularized incomplete beta
fn beta_quantile(a: f64, b: f64, p: f64) -> Result<f64> {
    if !(a > 0.0 && b > 0.0) {
        return Err(FoldevalError::configuration(
            format!("Beta({a}, {b}) has non-positive shape parameters"),
            "Shape parameters must be positive",
        ));
    }
    Ok(inv_beta_reg(a, b, p).clamp(0.0, 1.0))
}
