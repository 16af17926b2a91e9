use thiserror::Error;

/// Number of unconsumed characters quoted in syntax errors.
pub const CONTEXT_CHARS: usize = 10;

/// Errors that reject a query.
///
/// The first error aborts the parse; no partial tree is ever returned.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The grammar could not match at the current position
    #[error("{message} near `{near}`")]
    Syntax {
        message: String,
        /// Up to ten characters of the input that was not consumed
        near: String,
    },

    /// A `/.../` literal or wildcard that does not compile
    #[error("invalid regular expression /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// A `{"$oid": ...}` literal that does not decode to an identifier
    #[error("invalid object id literal `{literal}`: {reason}")]
    InvalidObjectId { literal: String, reason: String },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, remaining: &str) -> Self {
        ParseError::Syntax {
            message: message.into(),
            near: remaining.chars().take(CONTEXT_CHARS).collect(),
        }
    }
}
