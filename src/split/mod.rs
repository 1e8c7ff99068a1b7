//! Grouped stratified k-fold splitting
//!
//! Partitions a labeled dataset into train/test folds while keeping every
//! group (for example all images of one subject) inside a single fold.
//!
//! - `index`: class and group bookkeeping (`LabelGroupIndex`, `LabelCounts`)
//! - `stratified`: the greedy minimum-imbalance assignment
//! - `regression`: ten-bucket pseudo-labels for numeric targets
//! - `dataset`: reading the raw label table
//! - `writer`: `train_<i>.csv` / `test_<i>.csv` output
//!
//! ## Example
//!
//! ```
//! use foldeval::split::StratifiedGroupKFold;
//!
//! let files = ["a", "b", "c", "d"];
//! let labels = ["x", "x", "y", "y"];
//! let subjects = ["s1", "s1", "s2", "s3"];
//!
//! let folds = StratifiedGroupKFold::new(2)
//!     .split_classes(&files, &labels, Some(&subjects[..]))
//!     .unwrap();
//! assert_eq!(folds.len(), 2);
//! ```

mod dataset;
mod index;
mod regression;
mod stratified;
mod writer;


pub use dataset::{LabeledDataset, Sample};
pub use index::{LabelCounts, LabelGroupIndex};
pub use regression::{pseudo_labels, N_BUCKETS};
pub use stratified::{check_class_count, imbalance, Fold, FoldAssignment, StratifiedGroupKFold};
pub use writer::{FoldDatasetWriter, FoldFiles};

pub(crate) use writer::csv_error;
