//! Split command implementation

use super::{report, revalidate};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::apply_split_overrides;
use crate::config::{load_config, SplitArgs};
use crate::pipeline::{self, SplitReport};

/// One line per fold plus the final imbalance
pub fn format_split_report(report: &SplitReport) -> String {
    let mut lines = vec![format!(
        "Split {} samples in {} groups ({} classes) into {} folds",
        report.n_samples,
        report.n_groups,
        report.n_classes,
        report.folds.len()
    )];
    for fold in &report.folds {
        lines.push(format!(
            "  fold {}: {} train / {} test -> {}",
            fold.index,
            fold.n_train,
            fold.n_test,
            fold.files.test.display()
        ));
    }
    lines.push(format!("  imbalance: {:.6}", report.imbalance));
    lines.join("\n")
}

pub fn run_split(args: SplitArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Loading config: {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(report)?;
    apply_split_overrides(&mut spec, &args);
    revalidate(&spec)?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  mode={} n_splits={} shuffle={} seed={}",
            spec.task.mode, spec.split.n_splits, spec.split.shuffle, spec.split.seed
        ),
    );

    let split = pipeline::run_split(&spec).map_err(report)?;
    log(level, LogLevel::Normal, &format_split_report(&split));
    Ok(())
}
