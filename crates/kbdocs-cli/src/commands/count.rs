//! Count command - Totals per folder
//!
//! Provides the `kbdocs count` CLI command which prints the number of stored
//! files overall and per parent folder (`root` for top-level files).

use anyhow::Result;
use clap::Args;
use kbdocs_core::config::Purpose;
use kbdocs_core::usecases::{count_by_folder, ListDocumentsUseCase};
use serde_json::json;

use super::{document_store, CommandContext};

/// Count documents, grouped by folder
#[derive(Debug, Args)]
pub struct CountCommand {}

impl CountCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter("count");
        let config = ctx.load_config(Purpose::Cleanup)?;

        formatter.progress("Counting documents...");
        let files = ListDocumentsUseCase::new(document_store(&config))
            .execute()
            .await?;
        let folders = count_by_folder(&files);

        formatter.result(
            true,
            json!({
                "total": files.len(),
                "folders": folders,
            }),
        );
        formatter.success(&format!("Total files: {}", files.len()));
        formatter.line("Files by folder:");
        for (folder, count) in &folders {
            formatter.line(&format!("  {folder}: {count} files"));
        }
        Ok(())
    }
}
