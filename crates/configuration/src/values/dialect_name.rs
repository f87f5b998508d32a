use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Setting;

/// The name of the SQL dialect to produce, such as `oracle` or `postgresql`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct DialectName(pub Setting);

impl From<String> for DialectName {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for DialectName {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
