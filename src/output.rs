//! Rendering compiled queries and parse trees.
//!
//! Two encodings are supported for a compiled [`Document`]:
//!
//! - **Extended JSON** via [`to_extended_json()`], [`to_json()`] and
//!   [`to_json_pretty()`]. Types JSON cannot express use the MongoDB
//!   wrappers `{"$regex": ..., "$options": ...}`, `{"$date": ...}` and
//!   `{"$oid": ...}`.
//! - **Shell syntax** via [`to_shell()`] and [`to_shell_pretty()`], the form
//!   you would paste into a mongo shell: `/^v.*/i`, `ISODate("...")`,
//!   `ObjectId("...")`, unquoted identifier keys.
//!
//! Output is deterministic: documents keep the order the compiler built them in.
//!
//! # Examples
//!
//! ```
//! use mongo_search_query::{run, output::{to_json, to_shell}};
//!
//! let doc = run("level > 5").unwrap();
//! assert_eq!(to_json(&doc), r#"{"level":{"$gt":5}}"#);
//! assert_eq!(to_shell(&doc), "{ level: { $gt: 5 } }");
//! ```

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::{Map, json};

use crate::{
    ast::{AggregateExpr, Literal, Node},
    value::{Document, Value},
};

/// Largest integer a double holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

static IDENTIFIER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// Converts a document to MongoDB Extended JSON.
pub fn to_extended_json(doc: &Document) -> serde_json::Value {
    document_to_json(doc)
}

/// Compact Extended JSON text.
pub fn to_json(doc: &Document) -> String {
    to_extended_json(doc).to_string()
}

/// Extended JSON text with 2-space indentation.
pub fn to_json_pretty(doc: &Document) -> String {
    format!("{:#}", to_extended_json(doc))
}

/// Single-line mongo shell syntax.
pub fn to_shell(doc: &Document) -> String {
    ShellPrinter::new(false).print(doc)
}

/// Mongo shell syntax with 2-space indentation.
pub fn to_shell_pretty(doc: &Document) -> String {
    ShellPrinter::new(true).print(doc)
}

/// Renders a parse tree as `{"type": "op" | "field", ...}` JSON.
///
/// Aggregate-variable leaves render as fields whose name is the operator
/// they compile to, with the operator's arguments as the value.
pub fn ast_to_json(node: &Node) -> serde_json::Value {
    match node {
        Node::Op { op, left, right } => json!({
            "type": "op",
            "op": op.as_str(),
            "left": ast_to_json(left),
            "right": ast_to_json(right),
        }),
        Node::Field(field) => {
            let mut obj = Map::new();
            obj.insert("type".into(), json!("field"));
            obj.insert("name".into(), json!(field.name));
            obj.insert("value".into(), literal_to_json(&field.value));
            if let Some(cmp) = field.cmp {
                obj.insert("cmp".into(), json!(cmp.as_str()));
            }
            serde_json::Value::Object(obj)
        }
        Node::Aggregate(expr) => {
            let value = match expr {
                AggregateExpr::RegexMatch { input, regex } => json!({
                    "input": input,
                    "regex": value_to_json(&Value::Regex(regex.clone())),
                }),
                AggregateExpr::Compare { input, value, .. } => {
                    json!([input, literal_to_json(value)])
                }
            };
            json!({
                "type": "field",
                "name": expr.key(),
                "value": value,
            })
        }
    }
}

fn literal_to_json(literal: &Literal) -> serde_json::Value {
    value_to_json(&Value::from(literal.clone()))
}

fn document_to_json(doc: &Document) -> serde_json::Value {
    serde_json::Value::Object(
        doc.iter()
            .map(|(k, v)| (k.to_string(), value_to_json(v)))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Double(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Regex(p) => json!({ "$regex": p.source(), "$options": p.options() }),
        Value::DateTime(d) => json!({ "$date": format_date(d) }),
        Value::ObjectId(id) => json!({ "$oid": id.to_hex() }),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        Value::Document(doc) => document_to_json(doc),
    }
}

/// Integral doubles print as integers; non-finite ones have no JSON form.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        json!(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

fn format_date(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct ShellPrinter {
    pretty: bool,
}

impl ShellPrinter {
    pub fn new(pretty: bool) -> Self {
        ShellPrinter { pretty }
    }

    pub fn print(&self, doc: &Document) -> String {
        self.print_document(doc, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Boolean(b) => b.to_string(),
            Value::Double(n) if n.is_nan() => "NaN".to_string(),
            Value::Double(n) if n.is_infinite() => {
                let name = if *n > 0.0 { "Infinity" } else { "-Infinity" };
                name.to_string()
            }
            Value::Double(n) => n.to_string(),
            Value::String(s) => quote(s),
            Value::Regex(p) => p.to_string(),
            Value::DateTime(d) => format!("ISODate(\"{}\")", format_date(d)),
            Value::ObjectId(id) => format!("ObjectId(\"{}\")", id),
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Document(doc) => self.print_document(doc, indent),
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        let items: Vec<String> = arr
            .iter()
            .map(|v| self.print_value(v, indent + 1))
            .collect();

        if self.pretty {
            let items: Vec<String> = items
                .into_iter()
                .map(|item| format!("{}{}", self.indent(indent + 1), item))
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), self.indent(indent))
        } else {
            format!("[ {} ]", items.join(", "))
        }
    }

    fn print_document(&self, doc: &Document, indent: usize) -> String {
        if doc.is_empty() {
            return "{}".to_string();
        }

        let items: Vec<String> = doc
            .iter()
            .map(|(k, v)| format!("{}: {}", print_key(k), self.print_value(v, indent + 1)))
            .collect();

        if self.pretty {
            let items: Vec<String> = items
                .into_iter()
                .map(|item| format!("{}{}", self.indent(indent + 1), item))
                .collect();
            format!("{{\n{}\n{}}}", items.join(",\n"), self.indent(indent))
        } else {
            format!("{{ {} }}", items.join(", "))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

fn print_key(key: &str) -> String {
    if IDENTIFIER_KEY.is_match(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
