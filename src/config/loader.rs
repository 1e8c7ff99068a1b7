//! Run specification loading

use super::schema::RunSpec;
use super::validate::validate_config;
use crate::{FoldevalError, Result};
use std::fs;
use std::path::Path;

/// Load and validate a run spec from a YAML file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<RunSpec> {
    let path = config_path.as_ref();
    if !path.exists() {
        return Err(FoldevalError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let yaml_content = fs::read_to_string(path).map_err(|e| FoldevalError::io(path, e))?;
    let spec = parse_config(&yaml_content, path)?;
    tracing::debug!(path = %path.display(), mode = %spec.task.mode, "loaded run spec");
    Ok(spec)
}

/// Parse and validate YAML text; `origin` is only used in error messages
pub fn parse_config(yaml: &str, origin: &Path) -> Result<RunSpec> {
    let spec: RunSpec = serde_yaml::from_str(yaml).map_err(|e| FoldevalError::ConfigParsing {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    validate_config(&spec).map_err(|e| {
        FoldevalError::configuration(
            format!("{}: {e}", origin.display()),
            "Fix the value in the run spec or override it on the command line",
        )
    })?;

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let err = load_config("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, FoldevalError::ConfigNotFound { .. }));
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_bad_yaml() {
        let err = parse_config("dataset: [unclosed", Path::new("run.yaml")).unwrap_err();
        assert!(matches!(err, FoldevalError::ConfigParsing { .. }));
    }

    #[test]
    fn test_invalid_values_are_configuration_errors() {
        let yaml = "dataset:\n  path: a.csv\nsplit:\n  n_splits: 1\n";
        let err = parse_config(yaml, Path::new("run.yaml")).unwrap_err();
        assert!(matches!(err, FoldevalError::Configuration { .. }));
        assert!(err.to_string().contains("n_splits"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.yaml");
        fs::write(&path, "dataset:\n  path: labels.csv\ntask:\n  mode: regression\n").unwrap();

        let spec = load_config(&path).unwrap();
        assert_eq!(spec.dataset.path, PathBuf::from("labels.csv"));
        assert!(!spec.task.mode.is_classification());
    }
}
