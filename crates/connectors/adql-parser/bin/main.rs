use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use adql_parser::routes::create_router;
use adql_parser::state;
use adql_parser_configuration::environment::ProcessEnvironment;

#[derive(Parser)]
#[command(version)]
struct ServerOptions {
    /// The directory holding configuration.json.
    #[arg(long, value_name = "DIRECTORY", env = "ADQL_PARSER_CONFIGURATION", default_value = ".")]
    configuration: PathBuf,
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "PORT", default_value_t = 50051)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let server_options = ServerOptions::parse();
    env_logger::init();

    let configuration =
        state::read_configuration(&server_options.configuration, ProcessEnvironment).await?;
    let state = state::create_state(configuration, prometheus::Registry::new())?;
    let router = create_router(state);

    let address: SocketAddr =
        format!("{}:{}", server_options.host, server_options.port).parse()?;
    tracing::info!("starting server on {address}");

    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
