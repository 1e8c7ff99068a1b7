//! Raw labeled dataset loading

use crate::config::ColumnMap;
use crate::{FoldevalError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One labeled sample
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Sample identifier (usually an image filename)
    pub id: String,
    /// Class name, or the numeric target as written in the table
    pub label: String,
    /// Grouping key; the sample's own id when no grouping column is mapped
    pub group: String,
}

/// Samples read from the dataset table
#[derive(Clone, Debug, Default)]
pub struct LabeledDataset {
    samples: Vec<Sample>,
    grouped: bool,
}

impl LabeledDataset {
    /// Create from already-loaded samples
    pub fn new(samples: Vec<Sample>, grouped: bool) -> Self {
        Self { samples, grouped }
    }

    /// Read a comma-delimited table with a header row
    pub fn from_csv_path(path: &Path, columns: &ColumnMap) -> Result<Self> {
        let file = File::open(path).map_err(|e| FoldevalError::io(path, e))?;
        Self::from_reader(file, columns, path)
    }

    /// Read from any reader; `source` is only used in error messages
    pub fn from_reader<R: Read>(reader: R, columns: &ColumnMap, source: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| FoldevalError::malformed(source, e.to_string()))?
            .clone();

        let find = |name: &str| {
            headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
                FoldevalError::malformed(source, format!("missing column '{name}'"))
            })
        };
        let id_col = find(&columns.filename)?;
        let label_col = find(&columns.label)?;
        let group_col = columns.group.as_deref().map(find).transpose()?;

        let mut samples = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| FoldevalError::malformed(source, e.to_string()))?;
            let field = |col: usize| -> Result<String> {
                let value = record.get(col).map(str::trim).unwrap_or_default();
                if value.is_empty() {
                    return Err(FoldevalError::malformed(
                        source,
                        format!("row {}: empty value in column {}", row + 2, col + 1),
                    ));
                }
                Ok(value.to_string())
            };

            let id = field(id_col)?;
            let label = field(label_col)?;
            let group = match group_col {
                Some(col) => field(col)?,
                None => id.clone(),
            };
            samples.push(Sample { id, label, group });
        }

        tracing::info!(
            path = %source.display(),
            samples = samples.len(),
            grouped = group_col.is_some(),
            "loaded dataset"
        );

        Ok(Self {
            samples,
            grouped: group_col.is_some(),
        })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether a grouping column was mapped
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    pub fn ids(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.id.clone()).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.label.clone()).collect()
    }

    pub fn groups(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.group.clone()).collect()
    }

    /// Parse the label column as numeric regression targets
    pub fn targets(&self) -> Result<Vec<f64>> {
        self.samples
            .iter()
            .map(|s| {
                s.label.parse::<f64>().map_err(|_| {
                    FoldevalError::configuration(
                        format!("target '{}' of sample '{}' is not numeric", s.label, s.id),
                        "Regression mode needs a numeric label column",
                    )
                })
            })
            .collect()
    }
}
