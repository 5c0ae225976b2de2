//! Syntax of the pattern language: the [`Regex`] tree and its parser.
//!
//! Patterns are built from literals, `|` (union), adjacency (concatenation), postfix `*`
//! (Kleene star), parentheses for grouping and `@` for the empty string. There is no escape
//! mechanism: `(`, `)`, `|`, `*` and `@` can never be matched literally.

use thiserror::Error;

mod parse;
mod regex;

#[cfg(feature = "emit")]
mod emit;

pub use parse::MAX_NESTING_DEPTH;
pub use regex::Regex;

/// Reasons a pattern can be rejected by [`parse_regex`].
///
/// Positions are zero-based character indices into the pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty pattern (use '@' to match the empty string)")]
    EmptyPattern,
    #[error("expected an expression at position {position}, found end of pattern")]
    MissingOperand { position: usize },
    #[error("unexpected '{found}' at position {position}, expected an expression")]
    UnexpectedCharacter { position: usize, found: char },
    #[error("unmatched '(' at position {open}: expected ')' at position {position}")]
    UnclosedGroup { open: usize, position: usize },
    #[error("unexpected trailing input '{found}' at position {position}")]
    TrailingInput { position: usize, found: char },
    #[error("group at position {position} is nested deeper than {limit} levels")]
    NestingTooDeep { position: usize, limit: usize },
}

impl ParseError {
    /// The character position the error points at, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::EmptyPattern => None,
            ParseError::MissingOperand { position }
            | ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnclosedGroup { position, .. }
            | ParseError::TrailingInput { position, .. }
            | ParseError::NestingTooDeep { position, .. } => Some(*position),
        }
    }
}

/// parse a string to a regular expression
pub fn parse_regex(input: impl AsRef<str>) -> Result<Regex, ParseError> {
    parse::parse(input.as_ref())
}
