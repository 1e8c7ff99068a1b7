//! Validate command implementation

use super::report;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, RunSpec, ValidateArgs};

/// Format dataset configuration as a string
pub fn format_dataset_info(spec: &RunSpec) -> String {
    let columns = &spec.dataset.columns;
    format!(
        "  Dataset: {}\n  Columns: filename={} label={} group={}",
        spec.dataset.path.display(),
        columns.filename,
        columns.label,
        columns.group.as_deref().unwrap_or("(none)")
    )
}

/// Format task configuration as a string
pub fn format_task_info(spec: &RunSpec) -> String {
    let mut lines = vec![
        format!("  Mode: {}", spec.task.mode),
        format!("  Confidence level: {}", spec.task.alpha),
    ];
    if let Some(positive) = &spec.task.positive_class {
        lines.push(format!("  Positive class: {positive}"));
    }
    lines.join("\n")
}

/// Format split configuration as a string
pub fn format_split_info(spec: &RunSpec) -> String {
    let mut lines = vec![format!("  Folds: {}", spec.split.n_splits)];
    if spec.split.shuffle {
        lines.push(format!("  Shuffle: yes (seed {})", spec.split.seed));
    } else {
        lines.push("  Shuffle: no".to_string());
    }
    lines.push(format!("  Fold files: {}", spec.split.output_dir.display()));
    lines.join("\n")
}

/// Format summary configuration as a string
pub fn format_summary_info(spec: &RunSpec) -> String {
    format!(
        "  Miss records: {}\n  Summary output: {}",
        spec.summary.miss_dir.display(),
        spec.summary.output_dir.display()
    )
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &RunSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_dataset_info(spec));
    println!();
    println!("{}", format_task_info(spec));
    println!();
    println!("{}", format_split_info(spec));
    println!();
    println!("{}", format_summary_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(report)?;

    log(level, LogLevel::Normal, "Configuration is valid");
    if !spec.dataset.path.exists() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "  note: dataset {} does not exist yet",
                spec.dataset.path.display()
            ),
        );
    }

    if args.detailed {
        print_detailed_summary(&spec);
    }

    Ok(())
}
