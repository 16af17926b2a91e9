//! # Search Query - Abstract Syntax Tree
//!
//! This module defines the tree produced by [`parse`](crate::parse) and
//! consumed by [`compile`](crate::compile).
//!
//! - **[node]** - Tree nodes: boolean ops, field comparisons, aggregate-variable leaves
//! - **[operators]** - `AND`/`OR`, field comparators and aggregate operators
//! - **[literal]** - Coerced leaf values and the [`Pattern`] regex wrapper
//!
//! ## Query Shape
//!
//! ```text
//! level:error AND (type:upload OR type:alert)
//! ```
//!
//! parses to
//!
//! ```text
//! Op(and,
//!    Field(level = "error"),
//!    Op(or, Field(type = "upload"), Field(type = "alert")))
//! ```
//!
//! ## Leaves
//!
//! | Source                    | Node                                          |
//! |---------------------------|-----------------------------------------------|
//! | `failed`                  | `Field { name: "failed", value: true }`       |
//! | `count:5`                 | `Field { value: Number(5.0) }`                |
//! | `level >= 5`              | `Field { cmp: Some(Gte), value: Number(5.0) }`|
//! | `host:api-*`              | `Field { value: Regex(^api-.*$) }`            |
//! | `$$a.b:name`              | `Aggregate(Compare { op: Eq, .. })`           |
//! | `$$a.b:/^x/i`             | `Aggregate(RegexMatch { .. })`                |
pub mod literal;
pub mod node;
pub mod operators;

pub use literal::{Literal, Pattern};
pub use node::{AggregateExpr, Field, Node};
pub use operators::{AggregateOp, Comparator, LogicalOp};
