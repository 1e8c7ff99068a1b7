//! Error types with actionable diagnostics.
//!
//! Every failure in a cross-validation run is fatal: there is no partial
//! result mode, so each variant carries enough context to fix the input and
//! rerun.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for foldeval operations.
pub type Result<T> = std::result::Result<T, FoldevalError>;

/// Errors that can occur while splitting or summarizing a cross-validation run.
#[derive(Error, Debug)]
pub enum FoldevalError {
    /// Invalid split or task configuration.
    #[error("Configuration error: {message}\n  → {suggestion}")]
    Configuration { message: String, suggestion: String },

    /// A ratio was requested for a class with no ground-truth members.
    #[error("Insufficient data: {what} has no members\n  → Check that every class is represented in the aggregated miss records")]
    InsufficientData { what: String },

    /// AUC (or correlation) is undefined for the given scores.
    #[error("Degenerate scores: {message}\n  → The metric is undefined for this input")]
    DegenerateScore { message: String },

    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Create a run spec or pass a different path")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid YAML.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// IO error with the offending path attached.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV artifact exists but its content cannot be used.
    #[error("Malformed artifact {}: {message}", path.display())]
    MalformedArtifact { path: PathBuf, message: String },

    /// Figure rendering failed.
    #[error("Plot error: {message}")]
    Plot { message: String },
}

impl FoldevalError {
    /// Create a configuration error with a suggestion for the user.
    pub fn configuration(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an insufficient-data error naming the empty class or group.
    pub fn insufficient_data(what: impl Into<String>) -> Self {
        Self::InsufficientData { what: what.into() }
    }

    /// Create a degenerate-score error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateScore {
            message: message.into(),
        }
    }

    /// Create an IO error tagged with the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-artifact error.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedArtifact {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error is caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::InsufficientData { .. }
                | Self::DegenerateScore { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::MalformedArtifact { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "E001",
            Self::ConfigParsing { .. } => "E002",
            Self::Configuration { .. } => "E003",
            Self::InsufficientData { .. } => "E010",
            Self::DegenerateScore { .. } => "E011",
            Self::Io { .. } => "E050",
            Self::MalformedArtifact { .. } => "E051",
            Self::Plot { .. } => "E060",
        }
    }
}
