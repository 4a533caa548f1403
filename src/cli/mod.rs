//! CLI module
//!
//! Command-line interface for running the connector.
//!
//! # Commands
//!
//! - `spec` - Print the connector specification
//! - `check` - Test connection to the API
//! - `streams` - List available streams
//! - `read` - Extract data from streams

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
