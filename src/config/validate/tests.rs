//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use std::path::PathBuf;

fn create_valid_spec() -> RunSpec {
    RunSpec {
        dataset: DatasetSpec {
            path: PathBuf::from("labels.csv"),
            columns: ColumnMap {
                filename: "image".to_string(),
                label: "grade".to_string(),
                group: Some("subject".to_string()),
            },
        },
        task: TaskSpec::default(),
        split: SplitSpec::default(),
        summary: SummarySpec::default(),
    }
}

#[test]
fn test_valid_config() {
    let spec = create_valid_spec();
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_split_count() {
    let mut spec = create_valid_spec();
    spec.split.n_splits = 1;
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidSplitCount(1)));
}

#[test]
fn test_invalid_alpha() {
    for alpha in [0.0, 1.0, -0.5, f64::NAN] {
        let mut spec = create_valid_spec();
        spec.task.alpha = alpha;
        let err = validate_config(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAlpha(_)));
    }
}

#[test]
fn test_empty_label_column() {
    let mut spec = create_valid_spec();
    spec.dataset.columns.label = "  ".to_string();
    let err = validate_config(&spec).unwrap_err();
    assert_eq!(err, ValidationError::EmptyColumnName("label"));
}

#[test]
fn test_duplicate_columns() {
    let mut spec = create_valid_spec();
    spec.dataset.columns.label = "image".to_string();
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateColumn(_, _)));
}

#[test]
fn test_empty_output_dir() {
    let mut spec = create_valid_spec();
    spec.summary.output_dir = PathBuf::new();
    let err = validate_config(&spec).unwrap_err();
    assert_eq!(err, ValidationError::EmptyPath("summary.output_dir"));
}

#[test]
fn test_positive_class_only_in_binary_mode() {
    let mut spec = create_valid_spec();
    spec.task.positive_class = Some("malignant".to_string());
    assert!(validate_config(&spec).is_ok());

    spec.task.mode = TaskMode::Regression;
    let err = validate_config(&spec).unwrap_err();
    assert!(err.to_string().contains("malignant"));
}
