//! Document inventory use case
//!
//! Fetches the remote document tree and flattens it into file records.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::domain::{flatten_tree, DocumentRecord};
use crate::ports::IDocumentStore;

/// Folder label used for documents stored at the top level
pub const ROOT_FOLDER_LABEL: &str = "root";

/// Use case for listing the documents held by the store
pub struct ListDocumentsUseCase {
    store: Arc<dyn IDocumentStore + Send + Sync>,
}

impl ListDocumentsUseCase {
    pub fn new(store: Arc<dyn IDocumentStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Fetches and flattens the remote tree
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// unparseable body
    pub async fn execute(&self) -> Result<Vec<DocumentRecord>> {
        let tree = self
            .store
            .list_documents()
            .await
            .context("Failed to fetch document tree")?;

        let files = flatten_tree(&tree);
        debug!(count = files.len(), "Flattened document tree");
        Ok(files)
    }

    /// Same as [`execute`](Self::execute), but a failure is logged and
    /// reported as an empty inventory
    pub async fn inventory_or_empty(&self) -> Vec<DocumentRecord> {
        match self.execute().await {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Could not fetch existing documents");
                Vec::new()
            }
        }
    }
}

/// Number of documents per folder, sorted by folder
///
/// Top-level documents are counted under [`ROOT_FOLDER_LABEL`].
#[must_use]
pub fn count_by_folder(files: &[DocumentRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for file in files {
        let folder = file.folder().unwrap_or(ROOT_FOLDER_LABEL).to_string();
        *counts.entry(folder).or_insert(0) += 1;
    }
    counts
}

/// Documents whose name contains `pattern`; an empty pattern matches all
#[must_use]
pub fn filter_by_pattern(files: &[DocumentRecord], pattern: &str) -> Vec<DocumentRecord> {
    files
        .iter()
        .filter(|file| pattern.is_empty() || file.name.contains(pattern))
        .cloned()
        .collect()
}
