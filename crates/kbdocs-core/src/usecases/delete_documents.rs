//! Batched document deletion use case
//!
//! Partitions the delete targets into fixed-size batches and issues one
//! delete request per batch, strictly in order. The first failed batch
//! aborts the run; batches already deleted are not restored.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::{dedup_names, partition_batches, BatchSize};
use crate::ports::IDocumentStore;

/// Outcome of a batched delete run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchDeleteReport {
    /// Batches whose delete request succeeded
    pub completed_batches: usize,
    pub total_batches: usize,
    /// Targets carried by the completed batches
    pub deleted: usize,
    /// Targets requested
    pub total: usize,
    /// Error of the batch that aborted the run
    pub failure: Option<String>,
}

impl BatchDeleteReport {
    /// True only if every batch succeeded
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Use case for deleting documents in sequential batches
pub struct BatchDeleteUseCase {
    store: Arc<dyn IDocumentStore + Send + Sync>,
}

impl BatchDeleteUseCase {
    pub fn new(store: Arc<dyn IDocumentStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Deletes `names` in batches of `batch_size`
    ///
    /// Duplicate names inside a batch are sent once. Re-running after a
    /// partial failure re-sends the batches that already succeeded; the
    /// store treats deleting an absent document as a no-op.
    pub async fn execute(&self, names: &[String], batch_size: BatchSize) -> BatchDeleteReport {
        let batches = partition_batches(names, batch_size);
        let total_batches = batches.len();
        let mut report = BatchDeleteReport {
            completed_batches: 0,
            total_batches,
            deleted: 0,
            total: names.len(),
            failure: None,
        };

        for (index, batch) in batches.into_iter().enumerate() {
            let targets = dedup_names(batch.iter().cloned());
            debug!(
                batch = index + 1,
                of = total_batches,
                targets = targets.len(),
                "Deleting batch"
            );

            match self.store.remove_documents(&targets).await {
                Ok(()) => {
                    report.completed_batches += 1;
                    report.deleted += batch.len();
                    info!(
                        batch = index + 1,
                        of = total_batches,
                        deleted = report.deleted,
                        "Batch deleted"
                    );
                }
                Err(e) => {
                    let reason = format!("{e:#}");
                    error!(
                        batch = index + 1,
                        of = total_batches,
                        error = %reason,
                        "Batch delete failed, aborting"
                    );
                    report.failure = Some(reason);
                    break;
                }
            }
        }

        report
    }

    /// Deletes a single document through the batch path
    pub async fn delete_one(&self, name: &str) -> BatchDeleteReport {
        self.execute(&[name.to_string()], BatchSize::SINGLE).await
    }
}
