//! The CLI can do a few things. This provides a central point where those things are routed
//! and then done, making it easier to test this crate deterministically.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Subcommand;

use adql_parser_configuration as configuration;
use adql_parser_configuration::environment::Environment;
use query_engine_translation::translation;

/// The various contextual bits and bobs we need to run.
pub struct Context<Env: Environment> {
    pub context_path: PathBuf,
    pub environment: Env,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a default configuration file and its JSON schema.
    Initialize {
        /// Overwrite an existing configuration.
        #[arg(long)]
        force: bool,
    },
    /// Translate a query and print the SQL.
    Translate {
        /// Format the SQL over several lines.
        #[arg(long)]
        pretty: bool,
        /// The ADQL query, or `-` to read it from standard input.
        query: String,
    },
    /// Check the configuration and report any problem with it.
    Validate,
}

/// Run a command in a given directory, writing what it reports to `output`.
pub async fn run<Env: Environment>(
    command: Command,
    context: Context<Env>,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Initialize { force } => initialize(force, context, output).await?,
        Command::Translate { pretty, query } => translate(pretty, query, context, output).await?,
        Command::Validate => validate(context, output).await?,
    };
    Ok(())
}

/// Initialize an empty directory with a default configuration.
///
/// Refuses to touch a directory that already has a configuration file, unless forced.
async fn initialize(
    force: bool,
    context: Context<impl Environment>,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let configuration_file = context
        .context_path
        .join(configuration::version1::CONFIGURATION_FILENAME);
    if !force && tokio::fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite it",
            configuration_file.display()
        );
    }

    configuration::write_parsed_configuration(
        configuration::ParsedConfiguration::initial(),
        &context.context_path,
    )
    .await?;
    writeln!(output, "wrote {}", configuration_file.display())?;
    Ok(())
}

async fn translate(
    pretty: bool,
    query: String,
    context: Context<impl Environment>,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let configuration = read_configuration(context).await?;
    let query = if query == "-" {
        let mut query = String::new();
        std::io::stdin().read_to_string(&mut query)?;
        query
    } else {
        query
    };

    let sql = translation::query::translate(&configuration.index, query.trim())?;
    let sql = if pretty {
        sqlformat::format(
            &sql,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        )
    } else {
        sql
    };
    writeln!(output, "{sql}")?;
    Ok(())
}

async fn validate(
    context: Context<impl Environment>,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let configuration = read_configuration(context).await?;
    let index = configuration.index;
    writeln!(
        output,
        "configuration is valid: {} SQL, catalog positions in {}, HTM level {} in column {}",
        index.dialect, index.catalog_frame, index.spatial_index.level, index.spatial_index.column
    )?;
    Ok(())
}

async fn read_configuration(
    context: Context<impl Environment>,
) -> anyhow::Result<configuration::Configuration> {
    tracing::debug!(path = %context.context_path.display(), "reading configuration");
    let parsed = configuration::parse_configuration(&context.context_path).await?;
    Ok(configuration::make_runtime_configuration(
        parsed,
        context.environment,
    )?)
}
