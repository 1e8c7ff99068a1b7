//! Interval estimates and correlation
//!
//! - `binomial`: Clopper–Pearson exact interval for a proportion
//! - `auc`: ROC curve, Mann–Whitney AUC and the Hanley–McNeil interval
//! - `correlation`: Pearson r with a two-sided Student t p-value

mod auc;
mod binomial;
mod correlation;

pub use auc::{
    auc_confidence_interval, hanley_mcneil_se, roc_auc, roc_auc_ci, roc_curve, RocPoint,
};
pub use binomial::clopper_pearson;
pub use correlation::{pearson, Correlation};

use crate::{FoldevalError, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Point estimate with a two-sided confidence interval
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Estimate {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Estimate {
    pub fn new(point: f64, lower: f64, upper: f64) -> Self {
        Self {
            point,
            lower,
            upper,
        }
    }

    /// Whether `lower <= value <= upper`
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} [{:.4}, {:.4}]", self.point, self.lower, self.upper)
    }
}

/// Reject confidence levels outside the open interval (0, 1)
pub(crate) fn check_confidence(confidence: f64) -> Result<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(FoldevalError::configuration(
            format!("confidence level {confidence} is outside (0, 1)"),
            "Use a level such as 0.95",
        ))
    }
}

/// Two-sided standard normal quantile for `confidence`
pub(crate) fn z_value(confidence: f64) -> Result<f64> {
    check_confidence(confidence)?;
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| FoldevalError::configuration(e.to_string(), "Report this as a bug"))?;
    Ok(normal.inverse_cdf((1.0 + confidence) / 2.0))
}
