//! Errors for query translation.

use query_engine_parser::{LexError, SyntaxError};
use query_engine_sql::sql;
use thiserror::Error;

use super::spatial::SpatialError;

/// Why a query could not be translated. The message is what the caller gets back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("{0}")]
    Spatial(#[from] SpatialError),
    #[error(transparent)]
    Emit(#[from] sql::error::Error),
}

impl From<query_engine_parser::Error> for Error {
    fn from(err: query_engine_parser::Error) -> Self {
        match err {
            query_engine_parser::Error::Lex(err) => Error::Lex(err),
            query_engine_parser::Error::Syntax(err) => Error::Syntax(err),
        }
    }
}

impl Error {
    /// The stage that failed, as a metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lex",
            Error::Syntax(_) => "syntax",
            Error::Spatial(_) => "spatial",
            Error::Emit(_) => "emit",
        }
    }
}
