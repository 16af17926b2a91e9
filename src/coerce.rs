//! Value coercion.
//!
//! Turns the raw text matched for a field value into a typed [`Literal`].
//! The checks run in a fixed order and the first one that applies wins:
//!
//! 1. values that are already typed (numbers, identifiers) pass through
//! 2. `/.../` becomes a regular expression
//! 3. `true`/`yes` and `false`/`no` become booleans
//! 4. quoted text loses its quotes, and becomes a date if it is an ISO-8601 date-time
//! 5. text containing `*` becomes an anchored wildcard pattern
//! 6. anything else is a plain string
//!
//! Because quotes are handled before wildcards, `"a*b"` stays the literal
//! string `a*b`.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::{
    ast::{Literal, Pattern},
    error::ParseError,
};

static ISO_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-?(?:[1-9][0-9]*)?[0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(?:\.([0-9]+))?Z?$",
    )
    .expect("date-time pattern is valid")
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?$")
        .expect("number pattern is valid")
});

/// A field value as matched by the parser, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    /// Matched text, quotes and slashes included
    Text(&'a str),
    /// A value the parser has already typed
    Literal(Literal),
}

/// Coerces a raw value into a typed literal.
///
/// `case_insensitive` is the trailing `i` flag of a `/.../i` literal; it is
/// ignored for every other kind of value.
///
/// # Examples
///
/// ```
/// use mongo_search_query::{coerce, Literal, RawValue};
///
/// assert_eq!(coerce(RawValue::Text("yes"), false).unwrap(), Literal::Boolean(true));
/// assert_eq!(
///     coerce(RawValue::Text("'upload item'"), false).unwrap(),
///     Literal::String("upload item".into())
/// );
/// ```
pub fn coerce(raw: RawValue<'_>, case_insensitive: bool) -> Result<Literal, ParseError> {
    let text = match raw {
        RawValue::Literal(literal) => return Ok(literal),
        RawValue::Text(text) => text,
    };

    if text.starts_with('/') {
        return regex_literal(text, case_insensitive);
    }

    match text {
        "true" | "yes" => return Ok(Literal::Boolean(true)),
        "false" | "no" => return Ok(Literal::Boolean(false)),
        _ => {}
    }

    if let Some(unquoted) = strip_quotes(text) {
        return Ok(match parse_date(unquoted) {
            Some(date) => Literal::Date(date),
            None => Literal::String(unquoted.to_string()),
        });
    }

    if text.contains('*') {
        return wildcard(text);
    }

    Ok(Literal::String(text.to_string()))
}

/// Parses a bare token that is entirely numeric.
///
/// Tokens that merely start with digits (`1.2.3`, `2019-01-01`, `5abc`) are
/// not numbers, and neither are tokens that overflow to infinity (`1e400`).
pub fn parse_number(text: &str) -> Option<f64> {
    if !NUMBER.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a strict ISO-8601 date-time (`YYYY-MM-DDTHH:MM:SS[.fraction][Z]`).
///
/// The year may be signed or longer than four digits. A value without `Z`
/// is read as UTC as well. Dates that match the shape but do not exist
/// (`2023-02-30T...`) yield `None`.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let caps = ISO_DATE_TIME.captures(text)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let nanos = match caps.get(7) {
        Some(fraction) => {
            let digits: String = fraction.as_str().chars().take(9).collect();
            format!("{:0<9}", digits).parse::<u32>().ok()?
        }
        None => 0,
    };

    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;
    let date_time = date.and_hms_nano_opt(field(4)?, field(5)?, field(6)?, nanos)?;
    Some(date_time.and_utc())
}

fn regex_literal(text: &str, case_insensitive: bool) -> Result<Literal, ParseError> {
    let body = &text[1..];
    let body = body.strip_suffix('/').unwrap_or(body);
    let source = body.replace("\\/", "/");

    Pattern::new(source.as_str(), case_insensitive)
        .map(Literal::Regex)
        .map_err(|source_err| ParseError::InvalidPattern {
            pattern: source,
            source: source_err,
        })
}

fn wildcard(text: &str) -> Result<Literal, ParseError> {
    let source = format!("^{}$", escape_wildcard(text));

    Pattern::new(source.as_str(), false)
        .map(Literal::Regex)
        .map_err(|source_err| ParseError::InvalidPattern {
            pattern: source,
            source: source_err,
        })
}

/// Escapes regex metacharacters and turns each `*` into `.*`.
///
/// Only `.+?=^!:${}()|[]/\` are escaped, so `api-*` becomes `api-.*`.
fn escape_wildcard(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '*' => escaped.push_str(".*"),
            '.' | '+' | '?' | '=' | '^' | '!' | ':' | '$' | '{' | '}' | '(' | ')' | '|'
            | '[' | ']' | '/' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Strips one leading quote and, if present, one trailing quote.
fn strip_quotes(text: &str) -> Option<&str> {
    let inner = text.strip_prefix(['"', '\''])?;
    Some(inner.strip_suffix(['"', '\'']).unwrap_or(inner))
}
