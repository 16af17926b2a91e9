use regex::{Captures, Regex};

/// Position over the query text.
///
/// The parser never tokenizes up front: it matches anchored regular
/// expressions against [`rest`](Cursor::rest) and advances past whatever
/// matched. Captures borrow the input, not the cursor, so they stay usable
/// while the cursor moves on.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, position: 0 }
    }

    /// Byte offset of the next unconsumed character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Moves past `len` bytes. `len` must end on a char boundary of `rest()`.
    pub fn advance(&mut self, len: usize) {
        self.position = (self.position + len).min(self.input.len());
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.advance(rest.len() - trimmed.len());
    }

    /// Consumes `expected` if it is the next character.
    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance(expected.len_utf8());
            true
        } else {
            false
        }
    }

    /// Matches `pattern` at the head of the unconsumed input without consuming.
    pub fn peek(&self, pattern: &Regex) -> Option<Captures<'a>> {
        pattern
            .captures(self.rest())
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0))
    }

    /// Matches `pattern` at the head of the unconsumed input and consumes the match.
    pub fn eat(&mut self, pattern: &Regex) -> Option<Captures<'a>> {
        let caps = self.peek(pattern)?;
        let len = caps.get(0).map_or(0, |m| m.end());
        self.advance(len);
        Some(caps)
    }
}
