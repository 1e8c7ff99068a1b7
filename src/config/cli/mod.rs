//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! foldeval split run.yaml
//! foldeval split run.yaml -k 3 --shuffle --seed 7
//! foldeval summarize run.yaml --format json
//! foldeval validate run.yaml
//! foldeval info run.yaml
//! ```

mod core;
mod types;

pub use self::core::{
    apply_split_overrides, apply_summary_overrides, parse_args, Cli, Command, InfoArgs,
    SplitArgs, SummarizeArgs, ValidateArgs,
};
pub use types::OutputFormat;
