//! Configuration validation
//!
//! Validates run specifications for correctness before any stage executes.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::validate_config;
