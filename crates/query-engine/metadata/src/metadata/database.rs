//! Metadata information regarding the target database.

use std::fmt;
use std::str::FromStr;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The SQL dialects the engine can produce.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Oracle,
    Postgresql,
    Sqlite,
    Mysql,
}

impl Dialect {
    /// The canonical name of the dialect, as accepted in the configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Oracle => "oracle",
            Dialect::Postgresql => "postgresql",
            Dialect::Sqlite => "sqlite",
            Dialect::Mysql => "mysql",
        }
    }

    /// All supported dialect names, comma separated. Used in error messages.
    pub fn supported_names() -> String {
        enum_iterator::all::<Dialect>()
            .map(|dialect| dialect.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A dialect name that we do not know about.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{name}', expected one of: {}", Dialect::supported_names())]
pub struct UnknownDialect {
    pub name: String,
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oracle" => Ok(Dialect::Oracle),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::Postgresql),
            "sqlite" => Ok(Dialect::Sqlite),
            "mysql" => Ok(Dialect::Mysql),
            _ => Err(UnknownDialect {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dialect_names_and_aliases() {
        assert_eq!("Oracle".parse(), Ok(Dialect::Oracle));
        assert_eq!("postgres".parse(), Ok(Dialect::Postgresql));
        assert_eq!(" sqlite ".parse(), Ok(Dialect::Sqlite));
        assert_eq!("MySQL".parse(), Ok(Dialect::Mysql));
    }

    #[test]
    fn unknown_dialect_lists_the_supported_ones() {
        let err = "db2".parse::<Dialect>().unwrap_err();
        similar_asserts::assert_eq!(
            err.to_string(),
            "unknown dialect 'db2', expected one of: oracle, postgresql, sqlite, mysql"
        );
    }

    #[test]
    fn dialect_names_parse_back() {
        for dialect in enum_iterator::all::<Dialect>() {
            assert_eq!(dialect.name().parse(), Ok(dialect));
        }
    }
}
