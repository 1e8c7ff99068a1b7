//! Summary statistics of an aggregated cross-validation run

use super::crosstab::ConfusionMatrix;
use super::records::{MissTable, RecordKind};
use super::stats::{clopper_pearson, pearson, roc_auc_ci, roc_curve, Correlation, Estimate, RocPoint};
use crate::config::TaskMode;
use crate::split::csv_error;
use crate::{FoldevalError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Two-class summary around one positive class
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinarySummary {
    pub positive_class: String,
    pub auc: Estimate,
    pub sensitivity: Estimate,
    pub specificity: Estimate,
    pub roc: Vec<RocPoint>,
    /// (1 - specificity, sensitivity) of the argmax decision
    pub operating_point: (f64, f64),
}

/// Per-class accuracy with Clopper–Pearson intervals
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub class_names: Vec<String>,
    pub accuracy: Vec<Estimate>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegressionSummary {
    pub pearson: Correlation,
}

/// Summary of one run, selected by task mode
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Summary {
    Binary(BinarySummary),
    Categorical(CategoricalSummary),
    Regression(RegressionSummary),
}

impl Summary {
    /// Summarize an aggregated miss table
    ///
    /// `positive` names the positive class in binary mode; the second class
    /// column is used when it is `None`.
    pub fn compute(
        table: &MissTable,
        mode: TaskMode,
        confidence: f64,
        positive: Option<&str>,
    ) -> Result<Self> {
        let expected = match mode {
            TaskMode::Regression => RecordKind::Regression,
            TaskMode::Binary | TaskMode::Categorical => RecordKind::Classification,
        };
        if table.kind() != expected {
            return Err(FoldevalError::configuration(
                format!("{mode} summary needs {expected:?} records, got {:?}", table.kind()),
                "Match the task mode to the miss files",
            ));
        }
        if table.is_empty() {
            return Err(FoldevalError::insufficient_data("the aggregated miss table"));
        }

        let summary = match mode {
            TaskMode::Binary => Summary::Binary(binary(table, confidence, positive)?),
            TaskMode::Categorical => Summary::Categorical(categorical(table, confidence)?),
            TaskMode::Regression => Summary::Regression(RegressionSummary {
                pearson: pearson(&table.predicted_values(), &table.true_values())?,
            }),
        };
        tracing::info!(mode = %mode, samples = table.len(), "computed summary");
        Ok(summary)
    }

    /// Column names of the summary table
    pub fn columns(&self) -> Vec<String> {
        match self {
            Summary::Binary(_) => ["AUC", "sensitivity", "specificity"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            Summary::Categorical(c) => c.class_names.clone(),
            Summary::Regression(_) => vec!["pearsonr".to_string()],
        }
    }

    /// Rows of the summary table (point/lower/upper, or r/p for regression)
    pub fn rows(&self) -> Vec<Vec<f64>> {
        let by_stat = |estimates: &[Estimate]| -> Vec<Vec<f64>> {
            vec![
                estimates.iter().map(|e| e.point).collect(),
                estimates.iter().map(|e| e.lower).collect(),
                estimates.iter().map(|e| e.upper).collect(),
            ]
        };
        match self {
            Summary::Binary(b) => by_stat(&[b.auc, b.sensitivity, b.specificity]),
            Summary::Categorical(c) => by_stat(&c.accuracy),
            Summary::Regression(r) => vec![vec![r.pearson.r], vec![r.pearson.p_value]],
        }
    }

    /// Write the summary table as CSV
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
        writer
            .write_record(self.columns())
            .map_err(|e| csv_error(path, e))?;
        for row in self.rows() {
            writer
                .write_record(row.iter().map(f64::to_string))
                .map_err(|e| csv_error(path, e))?;
        }
        writer.flush().map_err(|e| FoldevalError::io(path, e))
    }
}

fn binary(table: &MissTable, confidence: f64, positive: Option<&str>) -> Result<BinarySummary> {
    let names = table.class_names();
    if names.len() != 2 {
        return Err(FoldevalError::configuration(
            format!("binary mode needs 2 classes, the miss table has {}", names.len()),
            "Use task mode 'categorical' for more than two classes",
        ));
    }
    let pos = match positive {
        Some(name) => names.iter().position(|n| n == name).ok_or_else(|| {
            FoldevalError::configuration(
                format!("positive class '{name}' is not one of {names:?}"),
                "Set task.positive_class to one of the class columns",
            )
        })?,
        None => 1,
    };

    let cm = ConfusionMatrix::from_table(table)?;
    let neg = 1 - pos;
    let n_pos = cm.support(pos);
    let n_neg = cm.support(neg);
    if n_pos == 0 {
        return Err(FoldevalError::insufficient_data(format!("class '{}'", names[pos])));
    }
    if n_neg == 0 {
        return Err(FoldevalError::insufficient_data(format!("class '{}'", names[neg])));
    }

    let sensitivity = clopper_pearson(cm.true_positives(pos), n_pos, confidence)?;
    let specificity = clopper_pearson(cm.true_positives(neg), n_neg, confidence)?;

    let scores = table.scores_of(pos);
    let is_positive: Vec<bool> = table.true_classes().iter().map(|&c| c == pos).collect();
    let auc = roc_auc_ci(&scores, &is_positive, confidence)?;
    let roc = roc_curve(&scores, &is_positive)?;

    Ok(BinarySummary {
        positive_class: names[pos].clone(),
        auc,
        sensitivity,
        specificity,
        roc,
        operating_point: (1.0 - specificity.point, sensitivity.point),
    })
}

fn categorical(table: &MissTable, confidence: f64) -> Result<CategoricalSummary> {
    let cm = ConfusionMatrix::from_table(table)?;
    let accuracy = (0..cm.n_classes())
        .map(|class| {
            let members = cm.support(class);
            if members == 0 {
                return Err(FoldevalError::insufficient_data(format!(
                    "class '{}'",
                    cm.class_names()[class]
                )));
            }
            clopper_pearson(cm.true_positives(class), members, confidence)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CategoricalSummary {
        class_names: cm.class_names().to_vec(),
        accuracy,
    })
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Binary(b) => {
                writeln!(f, "Positive class: {}", b.positive_class)?;
                writeln!(f, "AUC:          {}", b.auc)?;
                writeln!(f, "Sensitivity:  {}", b.sensitivity)?;
                writeln!(f, "Specificity:  {}", b.specificity)
            }
            Summary::Categorical(c) => {
                let width = c.class_names.iter().map(String::len).max().unwrap_or(0);
                writeln!(f, "Per-class accuracy:")?;
                for (name, estimate) in c.class_names.iter().zip(&c.accuracy) {
                    writeln!(f, "  {name:<width$}  {estimate}")?;
                }
                Ok(())
            }
            Summary::Regression(r) => {
                writeln!(
                    f,
                    "Pearson r: {:.4} (p = {:.4e}, n = {})",
                    r.pearson.r, r.pearson.p_value, r.pearson.n
                )
            }
        }
    }
}
