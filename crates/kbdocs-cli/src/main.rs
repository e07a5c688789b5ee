//! kbdocs CLI - Command-line interface for kbdocs
//!
//! Provides commands for:
//! - Listing and counting stored documents
//! - Deleting documents by name or name substring
//! - Importing a local directory tree
//! - Inspecting the configuration file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kbdocs_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    config::ConfigCommand, count::CountCommand, delete::DeleteCommand,
    delete_pattern::DeletePatternCommand, import::ImportCommand, list::ListCommand,
    CommandContext,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "kbdocs",
    version,
    about = "Document cleanup and import for AnythingLLM"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all documents
    List(ListCommand),
    /// Count documents, overall and per folder
    Count(CountCommand),
    /// Delete one document by name
    Delete(DeleteCommand),
    /// Delete every document whose name contains a substring
    DeletePattern(DeletePatternCommand),
    /// Upload the configured directory
    Import(ImportCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Log filter for the flags, falling back to the configured level
fn log_filter(verbose: u8, quiet: bool, configured: Option<&str>) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.unwrap_or("info").to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    // Setup tracing; LOG_LEVEL is read before the command loads the file itself
    let configured = Config::load(&config_path).ok().map(|c| c.logging.level);
    let filter = log_filter(cli.verbose, cli.quiet, configured.as_deref());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = CommandContext::new(format, config_path);

    match cli.command {
        Commands::List(cmd) => cmd.execute(&ctx).await,
        Commands::Count(cmd) => cmd.execute(&ctx).await,
        Commands::Delete(cmd) => cmd.execute(&ctx).await,
        Commands::DeletePattern(cmd) => cmd.execute(&ctx).await,
        Commands::Import(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
    }
}
