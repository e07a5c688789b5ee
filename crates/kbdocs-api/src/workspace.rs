//! Workspace embedding: `POST /api/v1/workspace/{slug}/update-embeddings`

use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::ApiError;

#[derive(Debug, Serialize)]
struct UpdateEmbeddingsRequest<'a> {
    adds: &'a [String],
}

/// Adds the documents at `adds` (store locations) to `workspace`
pub async fn update_embeddings(
    client: &ApiClient,
    workspace: &str,
    adds: &[String],
) -> Result<(), ApiError> {
    let url = client.segment_url("/workspace", [workspace, "update-embeddings"])?;
    debug!(workspace, count = adds.len(), "Updating embeddings");

    client
        .send(
            client
                .request_url(Method::POST, url)
                .json(&UpdateEmbeddingsRequest { adds }),
        )
        .await?;
    Ok(())
}
