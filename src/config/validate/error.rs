//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid n_splits: {0} (must be >= 2)")]
    InvalidSplitCount(usize),

    #[error("Invalid alpha: {0} (must be > 0.0 and < 1.0)")]
    InvalidAlpha(f64),

    #[error("Column name for '{0}' cannot be empty")]
    EmptyColumnName(&'static str),

    #[error("Path for '{0}' cannot be empty")]
    EmptyPath(&'static str),

    #[error("positive_class '{0}' is only meaningful in binary mode")]
    PositiveClassOutsideBinary(String),

    #[error("Columns '{0}' and '{1}' must differ")]
    DuplicateColumn(String, String),
}
