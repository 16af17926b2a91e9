use std::fmt;

use chrono::{DateTime, Utc};
use fancy_regex::{Regex, RegexBuilder};

use crate::object_id::ObjectId;

/// A coerced field value.
///
/// Every leaf of a parsed query holds one of these; raw matched text never
/// survives parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `true`, `yes`, `false`, `no`, or a bare field name with no value
    Boolean(bool),

    /// Fully numeric bare token
    ///
    /// # Example
    /// ```text
    /// count:5.2
    /// ```
    Number(f64),

    /// Bare word or quoted string with the quotes stripped
    String(String),

    /// `/.../` literal (optionally followed by `i`) or a wildcard pattern
    ///
    /// # Examples
    /// ```text
    /// hostname:/^v.*/i
    /// hostname:api-*
    /// ```
    Regex(Pattern),

    /// Quoted ISO-8601 date-time
    ///
    /// # Example
    /// ```text
    /// created>"2024-05-01T00:00:00Z"
    /// ```
    Date(DateTime<Utc>),

    /// `{"$oid": "<24 hex>"}` literal
    ObjectId(ObjectId),
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<Pattern> for Literal {
    fn from(p: Pattern) -> Self {
        Literal::Regex(p)
    }
}

impl From<ObjectId> for Literal {
    fn from(id: ObjectId) -> Self {
        Literal::ObjectId(id)
    }
}

/// A compiled regular expression that remembers how it was written.
///
/// Two patterns are equal when their source and case-insensitivity flag are
/// equal, mirroring how regular-expression literals compare structurally.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    case_insensitive: bool,
    regex: Regex,
}

impl Pattern {
    pub fn new(
        source: impl Into<String>,
        case_insensitive: bool,
    ) -> Result<Self, fancy_regex::Error> {
        let source = source.into();
        let regex = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Pattern {
            source,
            case_insensitive,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Option letters in the MongoDB `$options` form (`"i"` or `""`).
    pub fn options(&self) -> &'static str {
        if self.case_insensitive { "i" } else { "" }
    }

    /// Reports whether the pattern matches anywhere in `text`.
    ///
    /// A match that exceeds the backtracking limit counts as no match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text).unwrap_or(false)
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.case_insensitive == other.case_insensitive
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source.replace('/', "\\/"), self.options())
    }
}
