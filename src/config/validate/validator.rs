//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::{RunSpec, TaskMode};

/// Validate a run specification
///
/// Checks value ranges and names only. File existence is left to the stage
/// that opens the file, so a split can be validated before its inputs exist.
pub fn validate_config(spec: &RunSpec) -> Result<(), ValidationError> {
    if spec.split.n_splits < 2 {
        return Err(ValidationError::InvalidSplitCount(spec.split.n_splits));
    }

    let alpha = spec.task.alpha;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ValidationError::InvalidAlpha(alpha));
    }

    let columns = &spec.dataset.columns;
    if columns.filename.trim().is_empty() {
        return Err(ValidationError::EmptyColumnName("filename"));
    }
    if columns.label.trim().is_empty() {
        return Err(ValidationError::EmptyColumnName("label"));
    }
    if columns.filename == columns.label {
        return Err(ValidationError::DuplicateColumn(
            columns.filename.clone(),
            columns.label.clone(),
        ));
    }

    let paths = [
        ("dataset.path", &spec.dataset.path),
        ("split.output_dir", &spec.split.output_dir),
        ("summary.miss_dir", &spec.summary.miss_dir),
        ("summary.output_dir", &spec.summary.output_dir),
    ];
    for (name, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath(name));
        }
    }

    if let Some(positive) = &spec.task.positive_class {
        if spec.task.mode != TaskMode::Binary {
            return Err(ValidationError::PositiveClassOutsideBinary(positive.clone()));
        }
    }

    Ok(())
}
