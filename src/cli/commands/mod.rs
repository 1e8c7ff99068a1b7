//! CLI command implementations

mod info;
mod split;
mod summarize;
mod validate;


use crate::cli::{init_tracing, LogLevel};
use crate::config::{validate_config, Cli, Command, RunSpec};
use crate::FoldevalError;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);
    init_tracing(log_level);

    match cli.command {
        Command::Split(args) => split::run_split(args, log_level),
        Command::Summarize(args) => summarize::run_summarize(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
    }
}

/// Render an error with its stable code
fn report(err: FoldevalError) -> String {
    format!("[{}] {err}", err.code())
}

/// Re-check a spec after command-line overrides were applied
fn revalidate(spec: &RunSpec) -> Result<(), String> {
    validate_config(spec).map_err(|e| {
        report(FoldevalError::configuration(
            e.to_string(),
            "Check the command-line overrides",
        ))
    })
}
