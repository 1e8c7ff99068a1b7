//! Miss records: per-sample ground truth and prediction
//!
//! One table is written per fold (`miss_<i>.csv`), then the fold tables are
//! concatenated in fold-index order into the aggregate table that every
//! summary reads.

use crate::split::csv_error;
use crate::{FoldevalError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Ground truth or prediction of one sample
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// Class index (classification)
    Class(usize),
    /// Numeric value (regression)
    Value(f64),
}

impl Outcome {
    /// Class index, if this is a classification outcome
    pub fn class(&self) -> Option<usize> {
        match self {
            Outcome::Class(c) => Some(*c),
            Outcome::Value(_) => None,
        }
    }

    /// Numeric view; class indices are returned as floats
    pub fn value(&self) -> f64 {
        match self {
            Outcome::Class(c) => *c as f64,
            Outcome::Value(v) => *v,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Class(c) => write!(f, "{c}"),
            Outcome::Value(v) => write!(f, "{v}"),
        }
    }
}

/// One sample's identifier, ground truth and prediction
#[derive(Clone, Debug, PartialEq)]
pub struct MissRecord {
    pub filename: String,
    pub truth: Outcome,
    pub predicted: Outcome,
    /// Per-class scores, in class order (classification only)
    pub scores: Option<Vec<f64>>,
}

impl MissRecord {
    /// Whether the prediction differs from the ground truth
    pub fn is_miss(&self) -> bool {
        self.truth != self.predicted
    }
}

/// Layout of a miss table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// `filename,true,predict,<class scores...>`
    Classification,
    /// `filename,true,predict`
    Regression,
}

/// Miss records of one fold, or of all folds concatenated
#[derive(Clone, Debug, PartialEq)]
pub struct MissTable {
    kind: RecordKind,
    class_names: Vec<String>,
    records: Vec<MissRecord>,
}

impl MissTable {
    /// Build classification records from model scores and one-hot ground truth
    ///
    /// The predicted class is the argmax of each score vector and the true
    /// class the argmax of the one-hot vector; ties go to the lowest index.
    pub fn from_classification<S: AsRef<str>>(
        paths: &[S],
        scores: &[Vec<f64>],
        one_hot: &[Vec<f64>],
        class_names: &[String],
    ) -> Result<Self> {
        check_lengths(paths.len(), scores.len(), one_hot.len())?;
        let n_classes = class_names.len();

        let records = paths
            .iter()
            .zip(scores.iter().zip(one_hot))
            .map(|(path, (score, truth))| {
                if score.len() != n_classes || truth.len() != n_classes {
                    return Err(FoldevalError::configuration(
                        format!(
                            "sample '{}' has {} scores and {} truth entries for {} classes",
                            path.as_ref(),
                            score.len(),
                            truth.len(),
                            n_classes
                        ),
                        "Score and one-hot vectors need one entry per class",
                    ));
                }
                Ok(MissRecord {
                    filename: base_name(path.as_ref()),
                    truth: Outcome::Class(argmax(truth)),
                    predicted: Outcome::Class(argmax(score)),
                    scores: Some(score.clone()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind: RecordKind::Classification,
            class_names: class_names.to_vec(),
            records,
        })
    }

    /// Build regression records from predicted and true values
    pub fn from_regression<S: AsRef<str>>(
        paths: &[S],
        predicted: &[f64],
        truth: &[f64],
    ) -> Result<Self> {
        check_lengths(paths.len(), predicted.len(), truth.len())?;
        let records = paths
            .iter()
            .zip(predicted.iter().zip(truth))
            .map(|(path, (&p, &t))| MissRecord {
                filename: base_name(path.as_ref()),
                truth: Outcome::Value(t),
                predicted: Outcome::Value(p),
                scores: None,
            })
            .collect();

        Ok(Self {
            kind: RecordKind::Regression,
            class_names: Vec::new(),
            records,
        })
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Score column names (classification only)
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn records(&self) -> &[MissRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of misclassified samples
    pub fn misses(&self) -> usize {
        match self.kind {
            RecordKind::Classification => self.records.iter().filter(|r| r.is_miss()).count(),
            RecordKind::Regression => 0,
        }
    }

    /// Ground-truth classes (classification only)
    pub fn true_classes(&self) -> Vec<usize> {
        self.records.iter().filter_map(|r| r.truth.class()).collect()
    }

    /// Predicted classes (classification only)
    pub fn predicted_classes(&self) -> Vec<usize> {
        self.records.iter().filter_map(|r| r.predicted.class()).collect()
    }

    /// Ground truth as numbers
    pub fn true_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.truth.value()).collect()
    }

    /// Predictions as numbers
    pub fn predicted_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.predicted.value()).collect()
    }

    /// Scores of one class column
    pub fn scores_of(&self, class: usize) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.scores.as_ref().and_then(|s| s.get(class).copied()))
            .collect()
    }

    /// Append the rows of another table with the same layout
    pub fn extend(&mut self, other: MissTable) -> Result<()> {
        if other.kind != self.kind || other.class_names != self.class_names {
            return Err(FoldevalError::configuration(
                format!(
                    "cannot concatenate tables with columns {:?} and {:?}",
                    self.class_names, other.class_names
                ),
                "Every fold must be produced with the same class list",
            ));
        }
        self.records.extend(other.records);
        Ok(())
    }

    /// Write the table as CSV
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;

        let mut header = vec!["filename", "true", "predict"];
        header.extend(self.class_names.iter().map(String::as_str));
        writer.write_record(&header).map_err(|e| csv_error(path, e))?;

        for record in &self.records {
            let mut row = vec![
                record.filename.clone(),
                record.truth.to_string(),
                record.predicted.to_string(),
            ];
            if let Some(scores) = &record.scores {
                row.extend(scores.iter().map(f64::to_string));
            }
            writer.write_record(&row).map_err(|e| csv_error(path, e))?;
        }
        writer.flush().map_err(|e| FoldevalError::io(path, e))
    }

    /// Read a table written by [`MissTable::write_csv`]
    pub fn read_csv(path: &Path, kind: RecordKind) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;
        let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();

        let expected = ["filename", "true", "predict"];
        if headers.len() < 3 || headers.iter().take(3).ne(expected.iter().copied()) {
            return Err(FoldevalError::malformed(
                path,
                format!("header must start with filename,true,predict, got {headers:?}"),
            ));
        }
        let class_names: Vec<String> = headers.iter().skip(3).map(str::to_string).collect();
        match kind {
            RecordKind::Classification if class_names.is_empty() => {
                return Err(FoldevalError::malformed(path, "no class score columns"));
            }
            RecordKind::Regression if !class_names.is_empty() => {
                return Err(FoldevalError::malformed(
                    path,
                    "regression tables have no score columns",
                ));
            }
            _ => {}
        }

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|e| csv_error(path, e))?;
            let line = row + 2;
            let field = |col: usize| record.get(col).unwrap_or_default().trim();
            let number = |col: usize| -> Result<f64> {
                field(col).parse::<f64>().map_err(|_| {
                    FoldevalError::malformed(
                        path,
                        format!("line {line}: '{}' is not a number", field(col)),
                    )
                })
            };
            let class = |col: usize| -> Result<Outcome> {
                let value = number(col)?;
                if value < 0.0 || value.fract() != 0.0 || value as usize >= class_names.len() {
                    return Err(FoldevalError::malformed(
                        path,
                        format!("line {line}: '{}' is not a class index", field(col)),
                    ));
                }
                Ok(Outcome::Class(value as usize))
            };

            let parsed = match kind {
                RecordKind::Classification => MissRecord {
                    filename: field(0).to_string(),
                    truth: class(1)?,
                    predicted: class(2)?,
                    scores: Some(
                        (3..headers.len())
                            .map(&number)
                            .collect::<Result<Vec<_>>>()?,
                    ),
                },
                RecordKind::Regression => MissRecord {
                    filename: field(0).to_string(),
                    truth: Outcome::Value(number(1)?),
                    predicted: Outcome::Value(number(2)?),
                    scores: None,
                },
            };
            records.push(parsed);
        }

        Ok(Self {
            kind,
            class_names,
            records,
        })
    }
}

/// Writes per-fold miss tables and collects them back in fold order
#[derive(Clone, Debug)]
pub struct MissRecordAggregator {
    dir: PathBuf,
    kind: RecordKind,
}

impl MissRecordAggregator {
    pub fn new(dir: impl Into<PathBuf>, kind: RecordKind) -> Self {
        Self {
            dir: dir.into(),
            kind,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `miss_<fold>.csv`
    pub fn fold_path(&self, fold: usize) -> PathBuf {
        self.dir.join(format!("miss_{fold}.csv"))
    }

    /// Write one fold's table, creating the directory if needed
    pub fn write_fold(&self, fold: usize, table: &MissTable) -> Result<PathBuf> {
        if table.kind() != self.kind {
            return Err(FoldevalError::configuration(
                format!("fold {fold} table is {:?}, expected {:?}", table.kind(), self.kind),
                "Use one task mode for every fold",
            ));
        }
        fs::create_dir_all(&self.dir).map_err(|e| FoldevalError::io(&self.dir, e))?;
        let path = self.fold_path(fold);
        table.write_csv(&path)?;
        tracing::info!(fold, rows = table.len(), misses = table.misses(), path = %path.display(), "wrote miss records");
        Ok(path)
    }

    /// Concatenate `miss_0.csv` .. `miss_<k-1>.csv`
    ///
    /// A missing fold file aborts with an IO error naming the path.
    pub fn collect_folds(&self, n_folds: usize) -> Result<MissTable> {
        self.concat((0..n_folds).map(|fold| self.fold_path(fold)))
    }

    /// Concatenate every `miss_<i>.csv` in the directory, ordered by `i`
    ///
    /// Other files are ignored. The fold indices must be exactly `0..k`.
    pub fn collect_dir(&self) -> Result<MissTable> {
        let entries = fs::read_dir(&self.dir).map_err(|e| FoldevalError::io(&self.dir, e))?;
        let mut folds: Vec<usize> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FoldevalError::io(&self.dir, e))?;
            if let Some(fold) = entry.file_name().to_str().and_then(parse_fold_index) {
                folds.push(fold);
            }
        }
        folds.sort_unstable();

        if let Some(gap) = folds.iter().enumerate().find(|&(i, &fold)| i != fold) {
            return Err(FoldevalError::malformed(
                &self.dir,
                format!("miss files are not contiguous: expected miss_{}.csv", gap.0),
            ));
        }
        if folds.is_empty() {
            return Err(FoldevalError::malformed(&self.dir, "no miss_<i>.csv files"));
        }
        self.collect_folds(folds.len())
    }

    fn concat(&self, paths: impl Iterator<Item = PathBuf>) -> Result<MissTable> {
        let mut table: Option<MissTable> = None;
        for path in paths {
            if !path.exists() {
                return Err(FoldevalError::io(
                    &path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "fold miss file not found"),
                ));
            }
            let fold_table = MissTable::read_csv(&path, self.kind)?;
            tracing::debug!(path = %path.display(), rows = fold_table.len(), "read miss records");
            match table.as_mut() {
                Some(all) => all
                    .extend(fold_table)
                    .map_err(|e| FoldevalError::malformed(&path, e.to_string()))?,
                None => table = Some(fold_table),
            }
        }
        table.ok_or_else(|| FoldevalError::configuration("no folds to aggregate", "Use n_splits >= 1"))
    }
}

/// Parse the fold index out of `miss_<i>.csv`
///
/// Only the canonical spelling written by [`MissRecordAggregator::fold_path`]
/// is accepted, so `miss_01.csv` or `miss_+1.csv` are not fold files.
pub fn parse_fold_index(file_name: &str) -> Option<usize> {
    let digits = file_name.strip_prefix("miss_")?.strip_suffix(".csv")?;
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if !canonical {
        return None;
    }
    digits.parse().ok()
}

fn check_lengths(paths: usize, predicted: usize, truth: usize) -> Result<()> {
    if paths != predicted || paths != truth {
        return Err(FoldevalError::configuration(
            format!("{paths} paths, {predicted} predictions and {truth} ground-truth entries"),
            "Pass one prediction and one ground truth per sample",
        ));
    }
    Ok(())
}

/// Last path component, accepting both `/` and `\` separators
fn base_name(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
