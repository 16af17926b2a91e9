use chrono::{DateTime, Utc};

use crate::{
    ast::{Literal, Pattern},
    object_id::ObjectId,
};

/// A value inside a compiled query document.
///
/// This is the subset of document-store types a compiled query can contain:
/// JSON scalars plus regular expressions, dates and identifiers.
///
/// # Examples
///
/// ```
/// use mongo_search_query::{Document, Value};
///
/// let mut range = Document::new();
/// range.insert("$gt", 5.0);
///
/// let mut query = Document::new();
/// query.insert("level", range);
///
/// assert_eq!(
///     query.get("level").and_then(Value::as_document).and_then(|d| d.get("$gt")),
///     Some(&Value::Double(5.0))
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),

    /// Numbers are always doubles, as in the query text
    Double(f64),

    String(String),

    Regex(Pattern),

    DateTime(DateTime<Utc>),

    ObjectId(ObjectId),

    Array(Vec<Value>),

    Document(Document),
}

impl Value {
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::Number(n) => Value::Double(n),
            Literal::String(s) => Value::String(s),
            Literal::Regex(p) => Value::Regex(p),
            Literal::Date(d) => Value::DateTime(d),
            Literal::ObjectId(id) => Value::ObjectId(id),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Regex(p)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::ObjectId(id)
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}

/// A query document: string keys mapped to values, in insertion order.
///
/// Order is kept so a compiled query always renders the same way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// Inserts `value` under `key`, replacing any existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}
