//! Summarize command implementation

use super::{report, revalidate};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::apply_summary_overrides;
use crate::config::{load_config, OutputFormat, SummarizeArgs};
use crate::pipeline::{self, SummaryReport};

/// Render the summary in the requested format
pub fn format_summary(report: &SummaryReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => {
            let mut text = format!(
                "{} records, {} misclassified\n{}",
                report.n_records, report.misses, report.summary
            );
            for path in &report.artifacts {
                text.push_str(&format!("\n  wrote {}", path.display()));
            }
            Ok(text)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&report.summary)
            .map_err(|e| format!("Failed to serialize summary: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(&report.summary)
            .map_err(|e| format!("Failed to serialize summary: {e}")),
    }
}

pub fn run_summarize(args: SummarizeArgs, level: LogLevel) -> Result<(), String> {
    let mut spec = load_config(&args.config).map_err(report)?;
    apply_summary_overrides(&mut spec, &args);
    revalidate(&spec)?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Summarizing {} from {}",
            spec.task.mode,
            spec.summary.miss_dir.display()
        ),
    );

    let summary = pipeline::run_summary(&spec, args.n_splits).map_err(report)?;
    let rendered = format_summary(&summary, args.format)?;

    // Structured output goes to stdout regardless of verbosity
    match args.format {
        OutputFormat::Text => log(level, LogLevel::Normal, &rendered),
        OutputFormat::Json | OutputFormat::Yaml => println!("{rendered}"),
    }
    Ok(())
}
