//! Errors for SQL emission.

use query_engine_metadata::metadata::Dialect;
use thiserror::Error;

/// A node of the AST that the target dialect has no way of writing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{construct} is not supported by the {dialect} dialect")]
    UnsupportedConstruct { construct: String, dialect: Dialect },
}
