//! foldeval CLI
//!
//! # Usage
//!
//! ```bash
//! # Partition the dataset into folds
//! foldeval split run.yaml
//!
//! # Override fold count and shuffle seed
//! foldeval split run.yaml -k 10 --shuffle --seed 7
//!
//! # Summarize miss_<i>.csv files written by the training loop
//! foldeval summarize run.yaml --format json
//!
//! # Validate config
//! foldeval validate run.yaml
//! ```

use clap::Parser;
use foldeval::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
