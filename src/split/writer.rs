//! Per-fold train/test membership files

use super::dataset::LabeledDataset;
use super::stratified::Fold;
use crate::{FoldevalError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths written for one fold
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldFiles {
    pub train: PathBuf,
    pub test: PathBuf,
}

/// Writes `train_<i>.csv` and `test_<i>.csv` for each fold
#[derive(Clone, Debug)]
pub struct FoldDatasetWriter {
    dir: PathBuf,
}

impl FoldDatasetWriter {
    /// Create a writer rooted at `dir`, creating the directory if needed
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| FoldevalError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the train file of fold `index`
    pub fn train_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("train_{index}.csv"))
    }

    /// Path of the test file of fold `index`
    pub fn test_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("test_{index}.csv"))
    }

    /// Classification layout: one column per class listing its sample ids
    ///
    /// Columns follow class order and only classes present in the partition
    /// appear. Shorter columns are padded with empty cells.
    pub fn write_classification(
        &self,
        fold: &Fold,
        dataset: &LabeledDataset,
    ) -> Result<FoldFiles> {
        let files = FoldFiles {
            train: self.train_path(fold.index),
            test: self.test_path(fold.index),
        };
        write_class_columns(&files.train, &fold.train, dataset)?;
        write_class_columns(&files.test, &fold.test, dataset)?;
        tracing::debug!(
            fold = fold.index,
            train = fold.train.len(),
            test = fold.test.len(),
            "wrote fold membership"
        );
        Ok(files)
    }

    /// Regression layout: `filename,target` rows
    pub fn write_regression(
        &self,
        fold: &Fold,
        dataset: &LabeledDataset,
        targets: &[f64],
    ) -> Result<FoldFiles> {
        let files = FoldFiles {
            train: self.train_path(fold.index),
            test: self.test_path(fold.index),
        };
        write_target_rows(&files.train, &fold.train, dataset, targets)?;
        write_target_rows(&files.test, &fold.test, dataset, targets)?;
        tracing::debug!(
            fold = fold.index,
            train = fold.train.len(),
            test = fold.test.len(),
            "wrote fold membership"
        );
        Ok(files)
    }
}

fn write_class_columns(path: &Path, positions: &[usize], dataset: &LabeledDataset) -> Result<()> {
    let samples = dataset.samples();

    let mut classes: Vec<&str> = positions.iter().map(|&p| samples[p].label.as_str()).collect();
    classes.sort_unstable();
    classes.dedup();

    let columns: Vec<Vec<&str>> = classes
        .iter()
        .map(|class| {
            positions
                .iter()
                .filter(|&&p| samples[p].label == *class)
                .map(|&p| samples[p].id.as_str())
                .collect()
        })
        .collect();
    let n_rows = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer.write_record(&classes).map_err(|e| csv_error(path, e))?;
    for row in 0..n_rows {
        let record: Vec<&str> = columns
            .iter()
            .map(|column| column.get(row).copied().unwrap_or(""))
            .collect();
        writer.write_record(&record).map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| FoldevalError::io(path, e))
}

fn write_target_rows(
    path: &Path,
    positions: &[usize],
    dataset: &LabeledDataset,
    targets: &[f64],
) -> Result<()> {
    let samples = dataset.samples();
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer.write_record(["filename", "target"]).map_err(|e| csv_error(path, e))?;
    for &p in positions {
        let target = targets[p].to_string();
        writer
            .write_record([samples[p].id.as_str(), target.as_str()])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| FoldevalError::io(path, e))
}

/// Map a csv error, keeping IO failures as IO errors
pub(crate) fn csv_error(path: &Path, err: csv::Error) -> FoldevalError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => FoldevalError::io(path, io),
            other => FoldevalError::malformed(path, format!("{other:?}")),
        }
    } else {
        FoldevalError::malformed(path, err.to_string())
    }
}
