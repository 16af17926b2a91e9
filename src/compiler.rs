//! Folds a parsed query into a MongoDB-style query document.
//!
//! | Node                                  | Document                              |
//! |---------------------------------------|---------------------------------------|
//! | `Op(and, l, r)`                       | `{ $and: [l, r] }`                    |
//! | `Op(or, l, r)`                        | `{ $or: [l, r] }`                     |
//! | `Field { name, value }`               | `{ name: value }`                     |
//! | `Field { name, cmp: Gt, value }`      | `{ name: { $gt: value } }`            |
//! | `Aggregate(RegexMatch)`               | `{ $regexMatch: { input, regex } }`   |
//! | `Aggregate(Compare { op: Ne, .. })`   | `{ $ne: [input, value] }`             |
//!
//! The fold cannot fail: every tree the parser builds has a document form.

use crate::{
    ast::{AggregateExpr, Field, Node},
    value::{Document, Value},
};

/// Compiles an AST into a query document.
///
/// # Examples
///
/// ```
/// use mongo_search_query::{compile, parse, Value};
///
/// let doc = compile(&parse("level:error").unwrap());
/// assert_eq!(doc.get("level"), Some(&Value::String("error".into())));
/// ```
pub fn compile(node: &Node) -> Document {
    match node {
        Node::Op { op, left, right } => {
            let operands = vec![Value::Document(compile(left)), Value::Document(compile(right))];
            single(op.key(), Value::Array(operands))
        }
        Node::Field(field) => compile_field(field),
        Node::Aggregate(expr) => compile_aggregate(expr),
    }
}

fn compile_field(field: &Field) -> Document {
    let value = Value::from(field.value.clone());
    match field.cmp {
        None => single(&field.name, value),
        Some(cmp) => single(&field.name, Value::Document(single(cmp.key(), value))),
    }
}

fn compile_aggregate(expr: &AggregateExpr) -> Document {
    let args = match expr {
        AggregateExpr::RegexMatch { input, regex } => {
            let mut args = Document::new();
            args.insert("input", input.as_str());
            args.insert("regex", regex.clone());
            Value::Document(args)
        }
        AggregateExpr::Compare { input, value, .. } => Value::Array(vec![
            Value::String(input.clone()),
            Value::from(value.clone()),
        ]),
    };
    single(expr.key(), args)
}

fn single(key: &str, value: Value) -> Document {
    let mut doc = Document::new();
    doc.insert(key, value);
    doc
}
