//! Pearson correlation for regression predictions

use crate::{FoldevalError, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// |r| this close to 1 is reported with p = 0
const PERFECT_TOLERANCE: f64 = 1e-12;

/// Pearson r with its two-sided p-value
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
}

/// Pearson correlation of `x` and `y`
///
/// The p-value tests r = 0 against a Student t with n-2 degrees of freedom.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation> {
    if x.len() != y.len() {
        return Err(FoldevalError::configuration(
            format!("{} predictions but {} ground-truth values", x.len(), y.len()),
            "Pass one ground-truth value per prediction",
        ));
    }
    let n = x.len();
    if n < 3 {
        return Err(FoldevalError::insufficient_data(format!(
            "correlation over {n} pairs (need at least 3)"
        )));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(FoldevalError::degenerate("values contain NaN or infinite entries"));
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(FoldevalError::degenerate(
            "correlation is undefined for a constant series",
        ));
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let df = nf - 2.0;
    let p_value = if 1.0 - r.abs() < PERFECT_TOLERANCE {
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
            FoldevalError::configuration(format!("Student t({df}): {e}"), "Report this as a bug")
        })?;
        (2.0 * dist.sf(t.abs())).min(1.0)
    };

    Ok(Correlation { r, p_value, n })
}
