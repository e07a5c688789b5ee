//! AnythingLlmStore - IDocumentStore implementation for the AnythingLLM API
//!
//! Wraps the [`ApiClient`] and delegates to the endpoint modules to fulfil
//! the [`IDocumentStore`] port contract. Typed [`ApiError`]s are converted to
//! `anyhow` errors with context at this boundary.
//!
//! [`ApiError`]: crate::ApiError

use anyhow::{Context, Result};
use tracing::debug;

use kbdocs_core::config::Config;
use kbdocs_core::domain::{DocumentTree, FileNamed, FolderPath, UploadCandidate};
use kbdocs_core::ports::{FolderOutcome, IDocumentStore, UploadedDocument};

use crate::client::ApiClient;
use crate::{documents, folders, upload, workspace};

/// Document store backed by a remote AnythingLLM server
pub struct AnythingLlmStore {
    client: ApiClient,
}

impl AnythingLlmStore {
    /// Creates a store wrapping the given [`ApiClient`]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Creates a store from the server URL and key in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(ApiClient::new(config.server_url(), config.api_key()))
    }

    /// Returns the underlying client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IDocumentStore for AnythingLlmStore {
    async fn list_documents(&self) -> Result<DocumentTree> {
        debug!("AnythingLlmStore::list_documents");
        documents::list_documents(&self.client)
            .await
            .context("Failed to list documents")
    }

    async fn remove_documents(&self, names: &[String]) -> Result<()> {
        debug!(count = names.len(), "AnythingLlmStore::remove_documents");
        documents::remove_documents(&self.client, names)
            .await
            .with_context(|| format!("Failed to remove {} documents", names.len()))
    }

    async fn create_folder(&self, folder: &FolderPath) -> Result<FolderOutcome> {
        debug!(folder = %folder, "AnythingLlmStore::create_folder");
        folders::create_folder(&self.client, folder)
            .await
            .with_context(|| format!("Failed to create folder {folder}"))
    }

    async fn upload_document(
        &self,
        candidate: &UploadCandidate,
        workspaces: Option<&str>,
    ) -> Result<UploadedDocument> {
        debug!(
            file = candidate.file_name(),
            folder = candidate.target_folder_str(),
            "AnythingLlmStore::upload_document"
        );
        upload::upload_document(&self.client, candidate, workspaces)
            .await
            .with_context(|| format!("Failed to upload {}", candidate.file_name()))
    }

    async fn update_embeddings(&self, workspace: &str, adds: &[String]) -> Result<()> {
        debug!(workspace, count = adds.len(), "AnythingLlmStore::update_embeddings");
        workspace::update_embeddings(&self.client, workspace, adds)
            .await
            .with_context(|| format!("Failed to update embeddings for workspace '{workspace}'"))
    }
}
