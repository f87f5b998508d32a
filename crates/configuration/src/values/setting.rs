use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::environment::Variable;

/// A value written in the configuration file, or the name of an environment variable
/// holding it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Setting {
    Plain(String),
    FromEnvironment { variable: Variable },
}

impl From<String> for Setting {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<&str> for Setting {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
