//! Document store port (driven/secondary port)
//!
//! This module defines the interface for talking to the hosted document
//! store. The primary implementation targets the AnythingLLM REST API; use
//! cases only see this trait so they can be exercised with in-memory doubles.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific
//!   and don't need domain-level classification.
//! - Uses `#[async_trait]` for async trait methods.
//! - Every method performs exactly one request; nothing is retried.

use crate::domain::{DocumentTree, FolderPath, UploadCandidate};

/// Result of a folder creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderOutcome {
    /// The folder was created by this request
    Created,
    /// The folder was already present; treated as success
    AlreadyExists,
}

/// Documents produced by a successful upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Store locations of the processed documents, used for embedding
    pub locations: Vec<String>,
}

/// Port trait for document store operations
#[async_trait::async_trait]
pub trait IDocumentStore: Send + Sync {
    /// Fetches the full nested document tree
    async fn list_documents(&self) -> anyhow::Result<DocumentTree>;

    /// Deletes the named documents in a single request
    ///
    /// Deleting a document that no longer exists is expected to succeed.
    async fn remove_documents(&self, names: &[String]) -> anyhow::Result<()>;

    /// Creates a folder (one path, possibly nested)
    async fn create_folder(&self, folder: &FolderPath) -> anyhow::Result<FolderOutcome>;

    /// Uploads a single file into its target folder
    ///
    /// # Arguments
    /// * `candidate` - File content, name and target folder
    /// * `workspaces` - Optional comma-separated workspace slugs the document is added to
    async fn upload_document(
        &self,
        candidate: &UploadCandidate,
        workspaces: Option<&str>,
    ) -> anyhow::Result<UploadedDocument>;

    /// Embeds previously uploaded documents into a workspace
    async fn update_embeddings(&self, workspace: &str, adds: &[String]) -> anyhow::Result<()>;
}
