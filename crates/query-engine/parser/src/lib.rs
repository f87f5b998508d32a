//! Lexing and parsing of ADQL queries into the SQL AST.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{Error, LexError, LexErrorKind, SyntaxError};
pub use parser::parse;
