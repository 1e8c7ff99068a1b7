//! Shared infrastructure for foldeval.
//!
//! Holds the error taxonomy used by the splitter, the miss-record
//! aggregator and the statistical summaries.

pub mod error;

pub use error::{FoldevalError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_has_actionable_message() {
        let err = FoldevalError::ConfigNotFound {
            path: "/path/to/run.yaml".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("run.yaml"));
        assert!(msg.contains("not found"));
    }
}
