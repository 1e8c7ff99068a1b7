//! Info command implementation

use super::report;
use super::validate::{format_dataset_info, format_split_info, format_summary_info, format_task_info};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, InfoArgs, OutputFormat, RunSpec};

/// Render a run spec in the requested format
pub fn format_info(spec: &RunSpec, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok([
            format_dataset_info(spec),
            format_task_info(spec),
            format_split_info(spec),
            format_summary_info(spec),
        ]
        .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(spec)
            .map_err(|e| format!("Failed to serialize config: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(spec).map_err(|e| format!("Failed to serialize config: {e}"))
        }
    }
}

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(report)?;
    let rendered = format_info(&spec, args.format)?;

    match args.format {
        OutputFormat::Text => {
            log(
                level,
                LogLevel::Normal,
                &format!("Configuration: {}", args.config.display()),
            );
            log(level, LogLevel::Normal, &rendered);
        }
        OutputFormat::Json | OutputFormat::Yaml => println!("{rendered}"),
    }
    Ok(())
}
