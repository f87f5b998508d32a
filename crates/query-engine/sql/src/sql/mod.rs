//! Type definitions of a SQL AST representation, helpers to build it, and its conversion
//! into a dialect-specific SQL string.

pub mod ast;
pub mod convert;
pub mod dialect;
pub mod error;
pub mod helpers;
pub mod string;

pub use convert::select_to_sql;
