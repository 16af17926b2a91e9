//! Recursive-descent parser for search queries.
//!
//! ```text
//! expr    := '(' binop ')'
//! binop   := primary ((AND | OR) binop)?
//! primary := field | expr
//! field   := NAME [ws] [COMPARATOR] [ws] VALUE [i]
//! ```
//!
//! The whole input is wrapped in one pair of parentheses before parsing, so
//! the top level is always an `expr`. There is no token stream: each rule
//! matches an anchored regular expression at the head of the unconsumed input.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
    ast::{AggregateExpr, AggregateOp, Comparator, Field, Literal, LogicalOp, Node},
    coerce::{RawValue, coerce, parse_number},
    cursor::Cursor,
    error::ParseError,
    object_id::ObjectId,
};

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?i:(and|or))\b\s*").expect("keyword pattern is valid")
});

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\$\$)?[-.\w]+").expect("name pattern is valid")
});

// The identifier literal branch comes first so it wins over the generic values.
static VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<ws>\s*)(?P<cmp>[:><!=]*)\s*",
        r#"(?:(?P<oid>\{\s*"\$oid"\s*:\s*"[0-9a-fA-F]{24}"\s*\})"#,
        r"|(?P<bare>[-*\w.]+)",
        r#"|(?P<quoted>"[^"]*"|'[^']*')"#,
        r"|(?P<regex>/(?:\\.|[^/\\])*/)(?P<flags>i?))",
        r"\s*",
    ))
    .expect("value pattern is valid")
});

/// Parses a query string into an AST.
///
/// # Examples
///
/// ```
/// use mongo_search_query::{parse, Node};
///
/// assert_eq!(parse("failed").unwrap(), Node::field("failed", true));
/// assert!(parse("(level:error").is_err());
/// ```
pub fn parse(input: &str) -> Result<Node, ParseError> {
    let source = format!("({})", input.trim());
    Parser::new(&source).parse()
}

/// The value part of a field, before coercion.
struct ValueMatch<'a> {
    cmp: Option<Comparator>,
    raw: RawValue<'a>,
    case_insensitive: bool,
}

pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source`, which must already be a parenthesized
    /// expression. Use [`parse`] for raw user input.
    pub fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
        }
    }

    /// Parses one parenthesized expression and requires the input to end there.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_expr()?;
        if !self.cursor.is_at_end() {
            return Err(self.error("unexpected input after expression"));
        }
        Ok(node)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(message, self.cursor.rest())
    }

    /// '(' binop ')'
    fn parse_expr(&mut self) -> Result<Node, ParseError> {
        if !self.cursor.eat_char('(') {
            return Err(self.error("missing opening '('"));
        }
        self.cursor.skip_whitespace();

        let node = self.parse_binop()?;

        self.cursor.skip_whitespace();
        if !self.cursor.eat_char(')') {
            return Err(self.error("missing closing ')'"));
        }
        Ok(node)
    }

    /// field | expr
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        match self.parse_field()? {
            Some(node) => Ok(node),
            None => self.parse_expr(),
        }
    }

    /// primary ((AND | OR) binop)?
    fn parse_binop(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_primary()?;

        let Some(caps) = self.cursor.eat(&KEYWORD) else {
            return Ok(left);
        };
        let keyword = caps.get(1).map_or("", |m| m.as_str());
        let op = LogicalOp::from_keyword(keyword)
            .ok_or_else(|| self.error(format!("unknown operator `{}`", keyword)))?;

        // Right-recursive: `a AND b OR c` nests as `a AND (b OR c)`.
        let right = self.parse_binop()?;

        Ok(Node::op(op, left, right))
    }

    /// NAME [comparator] VALUE, or a bare NAME meaning `true`.
    fn parse_field(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(caps) = self.cursor.eat(&NAME) else {
            return Ok(None);
        };
        let name = caps.get(0).map_or("", |m| m.as_str()).to_string();

        let ValueMatch {
            cmp,
            raw,
            case_insensitive,
        } = self.parse_value()?.unwrap_or(ValueMatch {
            cmp: None,
            raw: RawValue::Literal(Literal::Boolean(true)),
            case_insensitive: false,
        });
        let value = coerce(raw, case_insensitive)?;

        if name.starts_with("$$") {
            return self.aggregate(name, cmp, value).map(Some);
        }

        Ok(Some(Node::Field(Field { name, value, cmp })))
    }

    fn parse_value(&mut self) -> Result<Option<ValueMatch<'a>>, ParseError> {
        let Some(caps) = self.cursor.peek(&VALUE) else {
            return Ok(None);
        };

        let token = group(&caps, "cmp");
        // A value separated only by whitespace belongs to whatever follows,
        // so `failed AND x:1` keeps `failed` as a bare boolean field.
        if token.is_empty() && !group(&caps, "ws").is_empty() {
            return Ok(None);
        }
        let cmp = self.comparator(token)?;

        let mut case_insensitive = false;
        let raw = if let Some(m) = caps.name("oid") {
            RawValue::Literal(Literal::ObjectId(decode_object_id(m.as_str())?))
        } else if let Some(m) = caps.name("bare") {
            match parse_number(m.as_str()) {
                Some(n) => RawValue::Literal(Literal::Number(n)),
                None => RawValue::Text(m.as_str()),
            }
        } else if let Some(m) = caps.name("quoted") {
            RawValue::Text(m.as_str())
        } else if let Some(m) = caps.name("regex") {
            case_insensitive = !group(&caps, "flags").is_empty();
            RawValue::Text(m.as_str())
        } else {
            return Ok(None);
        };

        self.cursor.advance(caps.get(0).map_or(0, |m| m.end()));

        Ok(Some(ValueMatch {
            cmp,
            raw,
            case_insensitive,
        }))
    }

    /// Equality is `:`, `=`, `==` or nothing; `:` may also prefix a comparator.
    fn comparator(&self, token: &str) -> Result<Option<Comparator>, ParseError> {
        let stripped = match token.strip_prefix(':') {
            Some(rest) if !rest.is_empty() => rest,
            _ => token,
        };

        match stripped {
            "" | ":" | "=" | "==" => Ok(None),
            _ => Comparator::from_token(stripped)
                .map(Some)
                .ok_or_else(|| self.error(format!("unknown comparator `{}`", token))),
        }
    }

    fn aggregate(
        &self,
        input: String,
        cmp: Option<Comparator>,
        value: Literal,
    ) -> Result<Node, ParseError> {
        let expr = match value {
            Literal::Regex(regex) => {
                if let Some(cmp) = cmp {
                    return Err(self.error(format!(
                        "comparator `{}` cannot be used with a regular expression on {}",
                        cmp.as_str(),
                        input
                    )));
                }
                AggregateExpr::RegexMatch { input, regex }
            }
            value => AggregateExpr::Compare {
                op: AggregateOp::from(cmp),
                input,
                value,
            },
        };
        Ok(Node::Aggregate(expr))
    }
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn decode_object_id(literal: &str) -> Result<ObjectId, ParseError> {
    let invalid = |reason: String| ParseError::InvalidObjectId {
        literal: literal.to_string(),
        reason,
    };

    let json: serde_json::Value =
        serde_json::from_str(literal).map_err(|e| invalid(e.to_string()))?;
    let hex = json
        .get("$oid")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| invalid("missing string `$oid`".to_string()))?;

    ObjectId::parse_str(hex).map_err(|e| invalid(e.to_string()))
}
