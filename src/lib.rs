//! foldeval: grouped stratified k-fold splitting and cross-validation summaries
//!
//! Two stages bracket an external train/evaluate loop:
//!
//! 1. [`split`] partitions a labeled dataset into k folds, keeping every group
//!    inside one fold while each fold's label mix tracks the global one.
//! 2. [`eval`] aggregates per-fold prediction records into a confusion table,
//!    AUC with a Hanley–McNeil interval, Clopper–Pearson sensitivity,
//!    specificity and per-class accuracy, or Pearson r for regression.
//!
//! [`pipeline`] runs both stages from a YAML run spec ([`config`]), and the
//! `foldeval` binary exposes them on the command line ([`cli`]).

pub mod cli;
pub mod config;
pub mod eval;
pub mod pipeline;
pub mod split;

pub use foldeval_common::{FoldevalError, Result};
