//! Errors for lexing and parsing.

use thiserror::Error;

/// A failure to split the query into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error at offset {offset}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated delimited identifier")]
    UnterminatedIdentifier,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("malformed number '{0}'")]
    MalformedNumber(String),
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
}

/// The first token that does not fit the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at offset {offset}: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub expected: String,
    pub found: String,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// Byte offset of the failure in the query.
    pub fn offset(&self) -> usize {
        match self {
            Error::Lex(err) => err.offset,
            Error::Syntax(err) => err.offset,
        }
    }
}
