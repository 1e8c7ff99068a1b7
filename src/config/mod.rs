//! Run configuration: YAML schema, loading, validation and CLI parsing

pub mod cli;
mod loader;
mod schema;
pub mod validate;

pub use cli::{Cli, Command, InfoArgs, OutputFormat, SplitArgs, SummarizeArgs, ValidateArgs};
pub use loader::{load_config, parse_config};
pub use schema::{
    ColumnMap, DatasetSpec, RunSpec, SplitSpec, SummarySpec, TaskMode, TaskSpec,
};
pub use validate::{validate_config, ValidationError};
