//! Type definitions of a low-level SQL string representation.

use query_engine_metadata::metadata::Dialect;

use super::ast::Identifier;
use super::dialect;

/// SQL text being built for a specific dialect.
#[derive(Debug, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
    pub dialect: Dialect,
}

impl SQL {
    pub fn new(dialect: Dialect) -> SQL {
        SQL {
            sql: String::new(),
            dialect,
        }
    }
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
    /// Regular identifiers are written as they came in. Delimited identifiers are quoted
    /// with the dialect's quote character, doubling any embedded quote.
    pub fn append_identifier(&mut self, identifier: &Identifier) {
        if identifier.delimited {
            let quote = dialect::profile(self.dialect).identifier_quote;
            self.sql.push(quote);
            for c in identifier.name.chars() {
                if c == quote {
                    self.sql.push(quote);
                }
                self.sql.push(c);
            }
            self.sql.push(quote);
        } else {
            self.sql.push_str(&identifier.name);
        }
    }
    /// A character string literal, with embedded single quotes doubled.
    pub fn append_string_literal(&mut self, value: &str) {
        self.sql.push('\'');
        self.sql.push_str(&value.replace('\'', "''"));
        self.sql.push('\'');
    }
}
