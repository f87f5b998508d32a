//! Routers over a fresh state, for testing the service without a network.

use std::path::Path;

use adql_parser_configuration::environment::EmptyEnvironment;

use crate::deployment::{get_deployment_file, STATIC_CONFIGURATION_DIR};

/// Creates a router with a fresh state from the checked-in sample configuration.
pub async fn create_router() -> axum::Router {
    create_router_from_deployment(get_deployment_file(STATIC_CONFIGURATION_DIR)).await
}

/// Creates a router with a fresh state from a configuration directory.
pub async fn create_router_from_deployment(configuration_dir: impl AsRef<Path>) -> axum::Router {
    let _ = env_logger::builder().is_test(true).try_init();

    let configuration = adql_parser::state::read_configuration(configuration_dir, EmptyEnvironment)
        .await
        .unwrap();
    let state =
        adql_parser::state::create_state(configuration, prometheus::Registry::new()).unwrap();
    adql_parser::routes::create_router(state)
}
