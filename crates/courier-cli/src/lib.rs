//! Command-line front end for Courier code generation.
//!
//! ```text
//! courier generate src/api.rs -o src/api_client.rs
//! courier inspect src/api.rs
//! courier classify '#[Query("page")]' --input page_number
//! ```

#![warn(missing_docs)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use courier_codegen::CodegenOptions;
use courier_config::{ConfigLoader, CourierConfig, CONFIG_FILE_NAME};

pub mod commands;

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(
    name = "courier",
    version,
    about = "Generate HTTP clients from annotated Rust traits"
)]
pub struct Cli {
    /// Configuration file (defaults to ./courier.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, overriding the configured level.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand every #[api] trait in a source file
    Generate(commands::generate::GenerateArgs),
    /// Print the scanned API definitions as JSON
    Inspect(commands::inspect::InspectArgs),
    /// Classify one attribute and render its statements
    Classify(commands::classify::ClassifyArgs),
}

/// Loads configuration for a CLI invocation.
///
/// An explicit `--config` file must exist; otherwise `courier.toml` in the
/// working directory is used if present. `.env` and `COURIER__*` overrides
/// apply last.
pub fn load_config(path: Option<&PathBuf>) -> anyhow::Result<CourierConfig> {
    let loader = ConfigLoader::new().with_defaults();
    let loader = match path {
        Some(path) => loader
            .with_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => loader.with_optional_file(CONFIG_FILE_NAME)?,
    };

    let config = loader.with_dotenv()?.with_env_prefix("COURIER").load()?;
    Ok(config)
}

/// Installs the global log subscriber for this invocation.
pub fn init_logging(cli: &Cli, config: &CourierConfig) -> anyhow::Result<()> {
    let mut log_config = config.logging.log_config();
    if let Some(level) = &cli.log_level {
        log_config = log_config.with_level(level.clone());
    }
    courier_telemetry::init_logging(&log_config)?;
    Ok(())
}

/// Runs one subcommand, writing results to `out`.
pub fn execute(command: &Command, options: &CodegenOptions, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Generate(args) => commands::generate::run(args, options, out),
        Command::Inspect(args) => commands::inspect::run(args, options, out),
        Command::Classify(args) => commands::classify::run(args, options, out),
    }
}

/// Loads configuration, sets up logging and runs the command.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;
    init_logging(&cli, &config)?;

    let options = CodegenOptions::new(config.classifier(), config.renderer());
    tracing::debug!(?options, "loaded configuration");

    execute(&cli.command, &options, out)
}
