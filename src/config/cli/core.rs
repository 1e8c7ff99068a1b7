//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::RunSpec;

/// foldeval: grouped stratified k-fold splits and cross-validation summaries
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "foldeval")]
#[command(version)]
#[command(
    about = "Grouped stratified k-fold splitting and cross-validation summary statistics"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Partition the dataset into train/test folds
    Split(SplitArgs),

    /// Aggregate per-fold miss records into summary statistics
    Summarize(SummarizeArgs),

    /// Validate a run spec without executing it
    Validate(ValidateArgs),

    /// Display information about a run spec
    Info(InfoArgs),
}

/// Arguments for the split command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SplitArgs {
    /// Path to YAML run spec
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override number of folds
    #[arg(short = 'k', long)]
    pub n_splits: Option<usize>,

    /// Override shuffle seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shuffle groups before assignment
    #[arg(long)]
    pub shuffle: bool,

    /// Override output directory of the fold files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the summarize command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SummarizeArgs {
    /// Path to YAML run spec
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Read exactly miss_0 .. miss_<k-1> instead of scanning the directory
    #[arg(short = 'k', long)]
    pub n_splits: Option<usize>,

    /// Override the miss record directory
    #[arg(long)]
    pub miss_dir: Option<PathBuf>,

    /// Override the summary output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format of the printed summary (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML run spec
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML run spec
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply split overrides to a RunSpec
pub fn apply_split_overrides(spec: &mut RunSpec, args: &SplitArgs) {
    if let Some(n_splits) = args.n_splits {
        spec.split.n_splits = n_splits;
    }
    if let Some(seed) = args.seed {
        spec.split.seed = seed;
    }
    if args.shuffle {
        spec.split.shuffle = true;
    }
    if let Some(output_dir) = &args.output_dir {
        spec.split.output_dir = output_dir.clone();
    }
}

/// Apply summarize overrides to a RunSpec
pub fn apply_summary_overrides(spec: &mut RunSpec, args: &SummarizeArgs) {
    if let Some(miss_dir) = &args.miss_dir {
        spec.summary.miss_dir = miss_dir.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        spec.summary.output_dir = output_dir.clone();
    }
    // n_splits selects the aggregation strategy and is not persisted
}
