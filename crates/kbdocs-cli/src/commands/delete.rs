//! Delete command - Remove one document by name
//!
//! Provides the `kbdocs delete <name>` CLI command. The name is sent as
//! given through the batch removal endpoint with a batch of one.

use anyhow::{bail, Result};
use clap::Args;
use kbdocs_core::config::Purpose;
use kbdocs_core::usecases::{BatchDeleteReport, BatchDeleteUseCase};

use super::{document_store, CommandContext};
use crate::output::{emit_result, OutputFormatter};

/// Delete a single document
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Stored document name or location (e.g. custom-documents/report.txt-1a2b.json)
    pub name: String,
}

impl DeleteCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter("delete");
        let config = ctx.load_config(Purpose::Cleanup)?;

        let report = BatchDeleteUseCase::new(document_store(&config))
            .delete_one(&self.name)
            .await;

        emit_result(formatter.as_ref(), report.is_success(), &report)?;
        if report.is_success() {
            formatter.success(&format!("Deleted: {}", self.name));
        }
        finish(formatter.as_ref(), &report)
    }
}

/// Turns a failed report into the command's error
pub(crate) fn finish(formatter: &dyn OutputFormatter, report: &BatchDeleteReport) -> Result<()> {
    match &report.failure {
        None => Ok(()),
        Some(reason) => {
            formatter.error(&format!(
                "Deletion stopped after {}/{} batches ({} of {} documents deleted): {}",
                report.completed_batches, report.total_batches, report.deleted, report.total, reason
            ));
            bail!(
                "Deletion failed after {}/{} batches",
                report.completed_batches,
                report.total_batches
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{get_formatter, OutputFormat};

    #[test]
    fn test_finish_reports_partial_failure() {
        let formatter = get_formatter(OutputFormat::Json, "delete");
        let ok = BatchDeleteReport {
            completed_batches: 2,
            total_batches: 2,
            deleted: 12,
            total: 12,
            failure: None,
        };
        assert!(finish(formatter.as_ref(), &ok).is_ok());

        let failed = BatchDeleteReport {
            completed_batches: 1,
            failure: Some("HTTP 500".to_string()),
            ..ok
        };
        let err = finish(formatter.as_ref(), &failed).unwrap_err();
        assert_eq!(err.to_string(), "Deletion failed after 1/2 batches");
    }
}
