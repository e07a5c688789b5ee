//! Pattern-based cleanup use case
//!
//! Finds documents whose name contains a substring, asks for confirmation,
//! then deletes them through [`BatchDeleteUseCase`].

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::domain::{BatchSize, DocumentRecord};
use crate::ports::{IConfirmation, IDocumentStore};

use super::delete_documents::{BatchDeleteReport, BatchDeleteUseCase};
use super::list_documents::{filter_by_pattern, ListDocumentsUseCase};

/// Result of a pattern delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternDeleteOutcome {
    /// No document matched
    NoMatches,
    /// The operator declined
    Cancelled,
    /// Deletion ran; see the report for partial failure
    Completed(BatchDeleteReport),
}

/// Use case for deleting every document matching a name substring
pub struct DeleteByPatternUseCase {
    list: ListDocumentsUseCase,
    delete: BatchDeleteUseCase,
    confirmation: Arc<dyn IConfirmation>,
}

impl DeleteByPatternUseCase {
    pub fn new(
        store: Arc<dyn IDocumentStore + Send + Sync>,
        confirmation: Arc<dyn IConfirmation>,
    ) -> Self {
        Self {
            list: ListDocumentsUseCase::new(store.clone()),
            delete: BatchDeleteUseCase::new(store),
            confirmation,
        }
    }

    /// Documents whose name contains `pattern` (all of them if empty)
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be fetched
    pub async fn find_matches(&self, pattern: &str) -> Result<Vec<DocumentRecord>> {
        let files = self.list.execute().await?;
        let matches = filter_by_pattern(&files, pattern);
        info!(pattern, matched = matches.len(), total = files.len(), "Matched documents");
        Ok(matches)
    }

    /// Confirms, then deletes `matches` by their store path
    pub async fn delete_matches(
        &self,
        matches: &[DocumentRecord],
        batch_size: BatchSize,
    ) -> PatternDeleteOutcome {
        if matches.is_empty() {
            return PatternDeleteOutcome::NoMatches;
        }

        let prompt = format!("Delete {} files?", matches.len());
        if !self.confirmation.confirm(&prompt) {
            info!("Deletion cancelled by operator");
            return PatternDeleteOutcome::Cancelled;
        }

        let targets: Vec<String> = matches.iter().map(|m| m.path.clone()).collect();
        PatternDeleteOutcome::Completed(self.delete.execute(&targets, batch_size).await)
    }
}
