//! The CLI for the ADQL translator.
//!
//! Sets up a configuration directory, checks it, and translates queries with it without
//! running the service.

use std::path::PathBuf;

use clap::Parser;

use adql_parser_cli::{run, Command, Context};
use adql_parser_configuration::environment::ProcessEnvironment;

/// The command-line arguments.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// The path to the configuration. Defaults to the current directory.
    #[arg(long = "context", env = "ADQL_PARSER_CONFIGURATION", value_name = "DIRECTORY")]
    pub context_path: Option<PathBuf>,
    /// The command to invoke.
    #[command(subcommand)]
    pub subcommand: Command,
}

/// The application entrypoint. It pulls information from the environment and then calls the
/// [run] function. The library remains unaware of the environment, so that we can more easily
/// test it.
#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::init();

    let context_path = match args.context_path {
        None => std::env::current_dir()?,
        Some(path) => path,
    };
    let context = Context {
        context_path,
        environment: ProcessEnvironment,
    };
    run(args.subcommand, context, &mut std::io::stdout()).await?;
    Ok(())
}
