//! Document identifiers.
//!
//! An [`ObjectId`] is the 12-byte identity value a document store assigns to
//! each document, written as 24 hexadecimal characters. The query compiler
//! treats it as opaque: it is only constructed, compared and printed.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors produced when decoding an identifier from hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    #[error("expected 24 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex character {0:?}")]
    InvalidCharacter(char),
}

/// A 12-byte document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        ObjectId(bytes)
    }

    /// Decodes an identifier from its 24-character hex form (either case).
    ///
    /// # Examples
    ///
    /// ```
    /// use mongo_search_query::ObjectId;
    ///
    /// let id = ObjectId::parse_str("5de937ba34f907002406af7a").unwrap();
    /// assert_eq!(id.to_hex(), "5de937ba34f907002406af7a");
    /// assert!(ObjectId::parse_str("5de937").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ObjectIdError::InvalidCharacter(c));
        }
        if s.len() != 24 {
            return Err(ObjectIdError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            // All characters are ASCII hex digits, so byte slicing is safe.
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| ObjectIdError::InvalidLength(s.len()))?;
        }
        Ok(ObjectId(bytes))
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Lowercase 24-character hex form.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
