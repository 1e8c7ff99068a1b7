//! YAML schema of a cross-validation run

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Group column: absent, `null`, empty or the literal "None" all mean no grouping
fn deserialize_group_column<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let column = Option::<String>::deserialize(deserializer)?;
    Ok(column.filter(|c| !c.trim().is_empty() && c != "None"))
}

/// Kind of prediction task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskMode {
    /// Two classes, one of them positive
    #[default]
    Binary,
    /// Three or more classes
    Categorical,
    /// Numeric target
    Regression,
}

impl TaskMode {
    pub fn is_classification(self) -> bool {
        !matches!(self, TaskMode::Regression)
    }
}

impl fmt::Display for TaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskMode::Binary => "binary",
            TaskMode::Categorical => "categorical",
            TaskMode::Regression => "regression",
        };
        f.write_str(name)
    }
}

/// Complete run specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Raw labeled dataset
    pub dataset: DatasetSpec,

    #[serde(default)]
    pub task: TaskSpec,

    #[serde(default)]
    pub split: SplitSpec,

    #[serde(default)]
    pub summary: SummarySpec,
}

/// Location and column layout of the labeled dataset table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub path: PathBuf,

    #[serde(default)]
    pub columns: ColumnMap,
}

/// Column names of the dataset table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Sample identifier column
    #[serde(default = "default_filename_column")]
    pub filename: String,

    /// Class or numeric target column
    #[serde(default = "default_label_column")]
    pub label: String,

    /// Optional grouping column (e.g. subject id)
    #[serde(
        default,
        deserialize_with = "deserialize_group_column",
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<String>,
}

fn default_filename_column() -> String {
    "filename".to_string()
}

fn default_label_column() -> String {
    "label".to_string()
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            filename: default_filename_column(),
            label: default_label_column(),
            group: None,
        }
    }
}

/// Task mode and interval settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    #[serde(default)]
    pub mode: TaskMode,

    /// Confidence level of every interval
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Positive class name in binary mode (default: second class column)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_class: Option<String>,
}

fn default_alpha() -> f64 {
    0.95
}

impl Default for TaskSpec {
    fn default() -> Self {
        Self {
            mode: TaskMode::default(),
            alpha: default_alpha(),
            positive_class: None,
        }
    }
}

/// Fold partitioning settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSpec {
    #[serde(default = "default_n_splits")]
    pub n_splits: usize,

    /// Shuffle groups before assignment
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub shuffle: bool,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Directory receiving `train_<i>.csv` / `test_<i>.csv`
    #[serde(default = "default_split_dir")]
    pub output_dir: PathBuf,
}

fn default_n_splits() -> usize {
    5
}

fn default_seed() -> u64 {
    42
}

fn default_split_dir() -> PathBuf {
    PathBuf::from("dataset")
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            n_splits: default_n_splits(),
            shuffle: false,
            seed: default_seed(),
            output_dir: default_split_dir(),
        }
    }
}

/// Summary input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySpec {
    /// Directory holding `miss_<i>.csv`
    #[serde(default = "default_miss_dir")]
    pub miss_dir: PathBuf,

    /// Directory receiving the aggregate table, crosstab, summary and figure
    #[serde(default = "default_summary_dir")]
    pub output_dir: PathBuf,
}

fn default_miss_dir() -> PathBuf {
    PathBuf::from("miss")
}

fn default_summary_dir() -> PathBuf {
    PathBuf::from("summary")
}

impl Default for SummarySpec {
    fn default() -> Self {
        Self {
            miss_dir: default_miss_dir(),
            output_dir: default_summary_dir(),
        }
    }
}
