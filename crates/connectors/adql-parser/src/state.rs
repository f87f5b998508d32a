//! Transient state used by the service.
//!
//! This is initialized on startup.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info_span;

use adql_parser_configuration::environment::Environment;
use adql_parser_configuration::error::{ParseConfigurationError, MakeRuntimeConfigurationError};
use adql_parser_configuration::Configuration;

use crate::metrics;

/// State for our service.
#[derive(Clone)]
pub struct ServerState {
    pub configuration: Arc<Configuration>,
    pub metrics: metrics::Metrics,
    pub metrics_registry: prometheus::Registry,
}

/// Read the configuration directory and resolve it against the environment.
pub async fn read_configuration(
    configuration_dir: impl AsRef<Path>,
    environment: impl Environment,
) -> Result<Configuration, InitializationError> {
    let parsed = adql_parser_configuration::parse_configuration(configuration_dir).await?;
    let configuration = adql_parser_configuration::make_runtime_configuration(parsed, environment)?;
    tracing::info!(
        dialect = %configuration.index.dialect,
        catalog_frame = %configuration.index.catalog_frame,
        index_column = %configuration.index.spatial_index.column,
        "loaded configuration"
    );
    Ok(configuration)
}

/// Set up metrics and wrap the configuration inside the service state.
pub fn create_state(
    configuration: Configuration,
    mut metrics_registry: prometheus::Registry,
) -> Result<ServerState, InitializationError> {
    let metrics = info_span!("Setup metrics").in_scope(|| {
        metrics::Metrics::initialize(&mut metrics_registry)
            .map_err(InitializationError::MetricsError)
    })?;

    Ok(ServerState {
        configuration: Arc::new(configuration),
        metrics,
        metrics_registry,
    })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
    #[error("{0}")]
    ParseConfiguration(#[from] ParseConfigurationError),
    #[error("{0}")]
    MakeRuntimeConfiguration(#[from] MakeRuntimeConfigurationError),
}
