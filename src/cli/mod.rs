//! CLI support for mongo-search-query
//!
//! Provides programmatic access to the `msq` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod compile;

pub use compile::{CompileOptions, OutputFormat, ParseOptions, execute_compile, execute_parse};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid query: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}
