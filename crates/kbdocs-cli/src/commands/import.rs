//! Import command - Upload a local tree into the document store
//!
//! Provides the `kbdocs import` CLI command which:
//! 1. Loads and validates the import configuration
//! 2. Scans `FILE_PATH` and skips files the store already holds
//! 3. Creates the required folders and uploads each file
//! 4. Optionally embeds the uploaded documents into the configured workspaces

use anyhow::{bail, Result};
use clap::Args;
use kbdocs_core::config::Purpose;
use kbdocs_core::usecases::{ImportFilesUseCase, ImportOptions, ImportReport};
use tracing::info;

use super::{document_store, CommandContext};
use crate::output::{emit_result, OutputFormatter};

/// Import files from the configured directory
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Show what would be uploaded without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Embed uploaded documents into WORKSPACES (or WORKSPACE_SLUG)
    #[arg(long)]
    pub embed: bool,
}

impl ImportCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter("import");

        let mut config = ctx.read_config()?;
        if self.dry_run {
            config.import.dry_run = true;
        }
        config.ensure_valid(Purpose::Import)?;

        info!(
            dry_run = config.import.dry_run,
            embed = self.embed,
            "Starting import"
        );
        let report = ImportFilesUseCase::new(document_store(&config))
            .execute(
                &config,
                ImportOptions {
                    dry_run: self.dry_run,
                    embed: self.embed,
                },
            )
            .await?;

        emit_result(formatter.as_ref(), report.is_clean(), &report)?;
        print_summary(formatter.as_ref(), &report);

        if !report.is_clean() {
            bail!(
                "Import finished with {} folder, {} upload and {} embedding failures",
                report.folder_failures.len(),
                report.upload_failures.len(),
                report.embed_failures.len()
            );
        }
        Ok(())
    }
}

fn print_summary(formatter: &dyn OutputFormatter, report: &ImportReport) {
    formatter.line(&format!(
        "Scanned {} files, {} already uploaded",
        report.scanned, report.duplicates
    ));

    if report.dry_run {
        formatter.success(&format!(
            "Dry run: {} files would be uploaded",
            report.planned.len()
        ));
        for planned in &report.planned {
            let folder = if planned.folder.is_empty() {
                "(top level)"
            } else {
                planned.folder.as_str()
            };
            formatter.line(&format!(
                "  {} -> {} ({} bytes)",
                planned.file_name, folder, planned.size
            ));
        }
        return;
    }

    formatter.line(&format!(
        "Folders: {} created, {} already existed",
        report.folders_created, report.folders_existing
    ));
    for failure in report
        .folder_failures
        .iter()
        .chain(&report.upload_failures)
        .chain(&report.embed_failures)
    {
        formatter.warn(&format!("{}: {}", failure.item, failure.reason));
    }
    for workspace in &report.embedded_workspaces {
        formatter.line(&format!("Embedded {} files in '{}'", report.locations.len(), workspace));
    }
    formatter.success(&format!(
        "Uploaded {} of {} files in {} ms",
        report.uploaded,
        report.planned.len(),
        report.duration_ms
    ));
}
