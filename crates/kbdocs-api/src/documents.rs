//! Document listing and removal
//!
//! - `GET /api/v1/documents` returns the nested folder tree
//! - `DELETE /api/v1/system/remove-documents` removes a batch by location

use kbdocs_core::domain::DocumentTree;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::ApiError;

/// Body of the batch removal request
#[derive(Debug, Serialize)]
struct RemoveDocumentsRequest<'a> {
    names: &'a [String],
}

/// Fetches the full document tree
pub async fn list_documents(client: &ApiClient) -> Result<DocumentTree, ApiError> {
    debug!("Fetching document tree");

    let response = client.send(client.request(Method::GET, "/documents")).await?;
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Removes the named documents in one request
///
/// The server treats unknown names as already removed.
pub async fn remove_documents(client: &ApiClient, names: &[String]) -> Result<(), ApiError> {
    debug!(count = names.len(), "Removing documents");

    client
        .send(
            client
                .request(Method::DELETE, "/system/remove-documents")
                .json(&RemoveDocumentsRequest { names }),
        )
        .await?;
    Ok(())
}
