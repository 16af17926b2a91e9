//! Compile or parse queries and render the result

use clap::ValueEnum;

use super::CliError;
use crate::{compile, output, parse};

/// How a compiled query document is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// MongoDB Extended JSON
    #[default]
    Json,
    /// Mongo shell syntax
    Shell,
}

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The search query to compile
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Output encoding
    pub format: OutputFormat,
}

/// Options for the parse command
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// The search query to parse
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
}

fn non_empty(query: &str) -> Result<&str, CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(query)
}

/// Compile a query and render the resulting document
pub fn execute_compile(options: &CompileOptions) -> Result<String, CliError> {
    let ast = parse(non_empty(&options.query)?)?;
    let doc = compile(&ast);

    let rendered = match (options.format, options.pretty) {
        (OutputFormat::Json, false) => output::to_json(&doc),
        (OutputFormat::Json, true) => output::to_json_pretty(&doc),
        (OutputFormat::Shell, false) => output::to_shell(&doc),
        (OutputFormat::Shell, true) => output::to_shell_pretty(&doc),
    };
    Ok(rendered)
}

/// Parse a query and render its syntax tree as JSON
pub fn execute_parse(options: &ParseOptions) -> Result<String, CliError> {
    let ast = parse(non_empty(&options.query)?)?;
    let json = ast.to_json();

    Ok(if options.pretty {
        format!("{:#}", json)
    } else {
        json.to_string()
    })
}
