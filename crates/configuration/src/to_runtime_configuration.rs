//! Convert the parsed configuration into the one the service runs with.

use std::path::PathBuf;

use query_engine_metadata::metadata::{self, Dialect, IndexConfig, MAX_HTM_LEVEL};

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{DialectName, Setting};
use crate::version1::{ParsedConfiguration, CONFIGURATION_FILENAME};

/// Resolve environment variables and check every setting. Any failure here is fatal at
/// startup.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let dialect = match parsed_config.dialect {
        DialectName(Setting::Plain(name)) => name,
        DialectName(Setting::FromEnvironment { variable }) => {
            environment.read(&variable).map_err(|error| {
                MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                    file_path: PathBuf::from(CONFIGURATION_FILENAME),
                    message: error.to_string(),
                }
            })?
        }
    };
    let dialect: Dialect = dialect
        .parse()
        .map_err(|error: metadata::UnknownDialect| invalid("dialect", error.to_string()))?;

    let columns = parsed_config.columns;
    for (name, column) in columns.named() {
        if column.trim().is_empty() {
            return Err(invalid(
                &format!("columns.{name}"),
                "column names must not be empty".to_string(),
            ));
        }
    }

    let spatial_index = parsed_config.spatial_index;
    if spatial_index.level > MAX_HTM_LEVEL {
        return Err(invalid(
            "spatialIndex.level",
            format!(
                "{} is deeper than the deepest supported level, {MAX_HTM_LEVEL}",
                spatial_index.level
            ),
        ));
    }
    if spatial_index.column.trim().is_empty() {
        return Err(invalid(
            "spatialIndex.column",
            "column names must not be empty".to_string(),
        ));
    }
    if spatial_index.cover.max_ranges == 0 {
        return Err(invalid(
            "spatialIndex.maxRanges",
            "at least one range is needed to cover a region".to_string(),
        ));
    }

    Ok(Configuration {
        index: IndexConfig {
            dialect,
            catalog_frame: parsed_config.catalog_frame,
            columns,
            spatial_index,
        },
    })
}

fn invalid(setting: &str, message: String) -> MakeRuntimeConfigurationError {
    MakeRuntimeConfigurationError::InvalidSetting {
        file_path: PathBuf::from(CONFIGURATION_FILENAME),
        setting: setting.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{EmptyEnvironment, FixedEnvironment, Variable};

    #[test]
    fn the_initial_configuration_is_valid() {
        let configuration =
            make_runtime_configuration(ParsedConfiguration::initial(), EmptyEnvironment).unwrap();
        assert_eq!(configuration.index, IndexConfig::default());
    }

    #[test]
    fn reads_the_dialect_from_the_environment() {
        let mut parsed = ParsedConfiguration::initial();
        parsed.dialect = DialectName(Setting::FromEnvironment {
            variable: Variable::new("DIALECT"),
        });
        let environment = FixedEnvironment::from([("DIALECT".into(), "postgres".to_string())]);
        let configuration = make_runtime_configuration(parsed.clone(), environment).unwrap();
        assert_eq!(configuration.index.dialect, Dialect::Postgresql);

        let err = make_runtime_configuration(parsed, EmptyEnvironment).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration in configuration.json: the environment variable \"DIALECT\" is not set"
        );
    }

    #[test]
    fn rejects_unknown_dialects() {
        let mut parsed = ParsedConfiguration::initial();
        parsed.dialect = "db2".into();
        let err = make_runtime_configuration(parsed, EmptyEnvironment).unwrap_err();
        similar_asserts::assert_eq!(
            err.to_string(),
            "invalid configuration in configuration.json: dialect: unknown dialect 'db2', expected one of: oracle, postgresql, sqlite, mysql"
        );
    }

    #[test]
    fn rejects_bad_index_settings() {
        let mut parsed = ParsedConfiguration::initial();
        parsed.spatial_index.level = 25;
        assert!(matches!(
            make_runtime_configuration(parsed, EmptyEnvironment),
            Err(MakeRuntimeConfigurationError::InvalidSetting { setting, .. }) if setting == "spatialIndex.level"
        ));

        let mut parsed = ParsedConfiguration::initial();
        parsed.columns.dec = " ".to_string();
        assert!(matches!(
            make_runtime_configuration(parsed, EmptyEnvironment),
            Err(MakeRuntimeConfigurationError::InvalidSetting { setting, .. }) if setting == "columns.dec"
        ));

        let mut parsed = ParsedConfiguration::initial();
        parsed.spatial_index.cover.max_ranges = 0;
        assert!(matches!(
            make_runtime_configuration(parsed, EmptyEnvironment),
            Err(MakeRuntimeConfigurationError::InvalidSetting { setting, .. }) if setting == "spatialIndex.maxRanges"
        ));
    }
}
