//! List command - Show every stored document
//!
//! Provides the `kbdocs list` CLI command which fetches the remote document
//! tree and prints one line per file with its path, id and size.

use anyhow::Result;
use clap::Args;
use kbdocs_core::config::Purpose;
use kbdocs_core::domain::DocumentRecord;
use kbdocs_core::usecases::ListDocumentsUseCase;

use super::{document_store, CommandContext};
use crate::output::emit_result;

/// List all documents in the store
#[derive(Debug, Args)]
pub struct ListCommand {}

impl ListCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter("list");
        let config = ctx.load_config(Purpose::Cleanup)?;

        formatter.progress("Fetching all documents...");
        let files = ListDocumentsUseCase::new(document_store(&config))
            .execute()
            .await?;

        emit_result(formatter.as_ref(), true, &files)?;
        formatter.success(&format!("Found {} files:", files.len()));
        for file in &files {
            formatter.line(&describe(file));
        }
        Ok(())
    }
}

/// One human-readable line per document
pub(crate) fn describe(file: &DocumentRecord) -> String {
    format!("{} (ID: {}) - Size: {}", file.path, file.id, file.size)
}
