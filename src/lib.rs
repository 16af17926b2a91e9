//! Compiles human-writable search queries into MongoDB-style query documents.
//!
//! ```
//! use mongo_search_query::{run, output::to_json};
//!
//! let doc = run("(level:error AND type:upload) OR type:alert").unwrap();
//! assert_eq!(
//!     to_json(&doc),
//!     r#"{"$or":[{"$and":[{"level":"error"},{"type":"upload"}]},{"type":"alert"}]}"#
//! );
//! ```
pub mod ast;
pub mod coerce;
pub mod compiler;
pub mod cursor;
pub mod error;
pub mod object_id;
pub mod output;
pub mod parser;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{AggregateExpr, AggregateOp, Comparator, Field, Literal, LogicalOp, Node, Pattern};
pub use coerce::{RawValue, coerce};
pub use compiler::compile;
pub use error::ParseError;
pub use object_id::{ObjectId, ObjectIdError};
pub use parser::{Parser, parse};
pub use value::{Document, Value};

/// Parses and compiles `query` in one step.
pub fn run(query: &str) -> Result<Document, ParseError> {
    let ast = parse(query)?;
    Ok(compile(&ast))
}
