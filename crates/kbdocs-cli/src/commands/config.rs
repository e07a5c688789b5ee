//! Config command - Inspect the key=value configuration
//!
//! Provides the `kbdocs config` CLI command which:
//! 1. Shows the parsed configuration (YAML or JSON, API key redacted)
//! 2. Validates the file for cleanup and import and reports every error

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use kbdocs_core::config::{Purpose, ValidationError};
use serde_json::json;
use tracing::info;

use super::CommandContext;
use crate::output::OutputFormatter;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Validate => self.execute_validate(ctx),
        }
    }

    fn execute_show(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter("config show");
        let config = ctx.read_config()?;

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.result(true, json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.line("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;

            for line in yaml.lines() {
                formatter.line(line);
            }
        }

        Ok(())
    }

    fn execute_validate(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter("config validate");
        let config = ctx.read_config()?;

        let cleanup = config.validate(Purpose::Cleanup);
        let import = config.validate(Purpose::Import);

        formatter.result(
            cleanup.is_empty() && import.is_empty(),
            json!({
                "config_path": ctx.config_path.display().to_string(),
                "cleanup": messages(&cleanup),
                "import": messages(&import),
            }),
        );
        report(formatter.as_ref(), "cleanup", &cleanup);
        report(formatter.as_ref(), "import", &import);

        if cleanup.is_empty() && import.is_empty() {
            Ok(())
        } else {
            bail!(
                "Configuration {} has {} problems",
                ctx.config_path.display(),
                distinct_count(&cleanup, &import)
            )
        }
    }
}

fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

fn report(formatter: &dyn OutputFormatter, purpose: &str, errors: &[ValidationError]) {
    if errors.is_empty() {
        formatter.success(&format!("Valid for {purpose}"));
        return;
    }
    formatter.error(&format!("Invalid for {purpose}:"));
    for error in errors {
        formatter.line(&format!("  {error}"));
    }
}

/// Number of distinct problems across both purposes
fn distinct_count(cleanup: &[ValidationError], import: &[ValidationError]) -> usize {
    let mut all: Vec<&ValidationError> = cleanup.iter().chain(import).collect();
    all.sort_by(|a, b| (&a.field, &a.message).cmp(&(&b.field, &b.message)));
    all.dedup();
    all.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::context_with;

    #[tokio::test]
    async fn test_validate_complete_file() {
        let (_file, ctx) = context_with(
            "ANYTHINGLLM_URL=http://localhost:3001\nANYTHINGLLM_API_KEY=k\nFILE_PATH=/data\n",
        );
        assert!(ConfigCommand::Validate.execute(&ctx).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_counts_shared_problems_once() {
        let (_file, ctx) = context_with("ANYTHINGLLM_API_KEY=k\n");
        let err = ConfigCommand::Validate.execute(&ctx).await.unwrap_err();
        // missing URL reported for both purposes, FILE_PATH for import only
        assert!(err.to_string().ends_with("has 2 problems"));
    }

    #[tokio::test]
    async fn test_show_does_not_validate() {
        let (_file, ctx) = context_with("LOG_LEVEL=debug\n");
        assert!(ConfigCommand::Show.execute(&ctx).await.is_ok());
    }
}
