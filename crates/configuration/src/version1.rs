//! The first version of the on-disk configuration format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use query_engine_metadata::metadata;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{DialectName, Setting};

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The configuration as written on disk: which database to produce SQL for and how its
/// catalog tables store and index sky positions.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: Version,
    /// The SQL dialect to produce: oracle, postgresql, sqlite or mysql.
    pub dialect: DialectName,
    /// The reference frame the catalog positions are stored in.
    #[serde(default = "default_catalog_frame")]
    pub catalog_frame: metadata::CoordinateSystem,
    #[serde(default)]
    pub columns: metadata::PositionColumns,
    #[serde(default)]
    pub spatial_index: metadata::SpatialIndex,
}

fn default_catalog_frame() -> metadata::CoordinateSystem {
    metadata::CoordinateSystem::Icrs
}

impl ParsedConfiguration {
    /// The configuration written by `initialize`.
    pub fn initial() -> Self {
        let defaults = metadata::IndexConfig::default();
        ParsedConfiguration {
            version: Version::This,
            dialect: DialectName(Setting::Plain(defaults.dialect.name().to_string())),
            catalog_frame: defaults.catalog_frame,
            columns: defaults.columns,
            spatial_index: defaults.spatial_index,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let parse_error = |error: serde_json::Error| ParseConfigurationError::ParseError {
        file_path: configuration_file.clone(),
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    };

    // check the version tag first, so an old or future file gets a useful message
    let value: serde_json::Value =
        serde_json::from_str(&configuration_file_contents).map_err(parse_error)?;
    match value.get("version") {
        Some(serde_json::Value::String(version)) if version == "1" => (),
        Some(version) => {
            return Err(ParseConfigurationError::UnsupportedVersion {
                file_path: configuration_file.clone(),
                version: match version {
                    serde_json::Value::String(version) => version.clone(),
                    other => other.to_string(),
                },
            })
        }
        None => {
            return Err(ParseConfigurationError::DidNotFindExpectedVersionTag(
                configuration_file.clone(),
            ))
        }
    }

    serde_json::from_str(&configuration_file_contents).map_err(parse_error)
}

/// Write the parsed configuration into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    // create the jsonschema file
    let configuration_jsonschema_file_path = out_dir
        .as_ref()
        .to_owned()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME);

    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}
