//! Cross-validation summaries
//!
//! Turns per-fold prediction records into the run's summary artifacts.
//!
//! ## Architecture
//!
//! - `records`: miss records, per-fold tables and their aggregation
//! - `crosstab`: confusion matrix and predicted × true table with margins
//! - `stats`: Clopper–Pearson, ROC/AUC with Hanley–McNeil, Pearson r
//! - `summary`: binary / categorical / regression summaries
//! - `plot`: ROC and prediction scatter figures
//!
//! ## Example
//!
//! ```
//! use foldeval::config::TaskMode;
//! use foldeval::eval::{MissTable, Summary};
//!
//! let classes = vec!["neg".to_string(), "pos".to_string()];
//! let table = MissTable::from_classification(
//!     &["a.png", "b.png", "c.png", "d.png"],
//!     &[vec![0.9, 0.1], vec![0.4, 0.6], vec![0.3, 0.7], vec![0.8, 0.2]],
//!     &[vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]],
//!     &classes,
//! )?;
//!
//! let summary = Summary::compute(&table, TaskMode::Binary, 0.95, None)?;
//! println!("{summary}");
//! # Ok::<(), foldeval::FoldevalError>(())
//! ```

pub mod crosstab;
pub mod plot;
pub mod records;
pub mod stats;
pub mod summary;

pub use crosstab::{ConfusionMatrix, CrossTab};
pub use plot::{render_roc, render_scatter};
pub use records::{parse_fold_index, MissRecord, MissRecordAggregator, MissTable, Outcome, RecordKind};
pub use stats::{
    auc_confidence_interval, clopper_pearson, hanley_mcneil_se, pearson, roc_auc, roc_auc_ci,
    roc_curve, Correlation, Estimate, RocPoint,
};
pub use summary::{BinarySummary, CategoricalSummary, RegressionSummary, Summary};
