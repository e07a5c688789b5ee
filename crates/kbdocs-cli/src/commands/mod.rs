//! CLI subcommands
//!
//! Every command receives a [`CommandContext`] carrying the output format
//! and the configuration file location, loads and validates the
//! configuration for its purpose, then wires the HTTP adapter into the
//! matching use case.

pub mod config;
pub mod count;
pub mod delete;
pub mod delete_pattern;
pub mod import;
pub mod list;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use kbdocs_api::provider::AnythingLlmStore;
use kbdocs_core::config::{Config, Purpose};
use kbdocs_core::ports::IDocumentStore;
use tracing::info;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// State shared by every command invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub format: OutputFormat,
    pub config_path: PathBuf,
}

impl CommandContext {
    pub fn new(format: OutputFormat, config_path: PathBuf) -> Self {
        Self {
            format,
            config_path,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Formatter for `command`, named in JSON envelopes
    pub fn formatter(&self, command: &'static str) -> Box<dyn OutputFormatter> {
        get_formatter(self.format, command)
    }

    /// Reads the configuration file without validating it
    pub fn read_config(&self) -> Result<Config> {
        let config = Config::load(&self.config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                self.config_path.display()
            )
        })?;
        info!(config_path = %self.config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Reads the configuration and fails unless it is valid for `purpose`
    pub fn load_config(&self, purpose: Purpose) -> Result<Config> {
        let config = self.read_config()?;
        config.ensure_valid(purpose)?;
        Ok(config)
    }
}

/// Builds the HTTP-backed document store for `config`
pub fn document_store(config: &Config) -> Arc<dyn IDocumentStore + Send + Sync> {
    Arc::new(AnythingLlmStore::from_config(config))
}
