//! Document upload: `POST /api/v1/document/upload[/{folder}]`
//!
//! The file travels as the multipart `file` part with its content type.
//! Workspaces go in an optional `addToWorkspaces` text field. Each folder
//! segment is percent-encoded into the path.

use kbdocs_core::domain::{FileNamed, UploadCandidate};
use kbdocs_core::ports::UploadedDocument;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::ApiError;

const UPLOAD_PATH: &str = "/document/upload";

/// Upload response; only the processed document locations are used
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    documents: Vec<UploadedEntry>,
}

#[derive(Debug, Deserialize)]
struct UploadedEntry {
    location: String,
}

/// Builds the multipart body for `candidate`
fn build_form(candidate: &UploadCandidate, workspaces: Option<&str>) -> Result<Form, ApiError> {
    let part = Part::bytes(candidate.content().to_vec())
        .file_name(candidate.file_name().to_string())
        .mime_str(candidate.content_type())?;

    let mut form = Form::new().part("file", part);
    if let Some(workspaces) = workspaces.filter(|w| !w.is_empty()) {
        form = form.text("addToWorkspaces", workspaces.to_string());
    }
    Ok(form)
}

/// Uploads one file into its target folder
pub async fn upload_document(
    client: &ApiClient,
    candidate: &UploadCandidate,
    workspaces: Option<&str>,
) -> Result<UploadedDocument, ApiError> {
    let segments = candidate
        .target_folder()
        .map(|folder| folder.segments().collect::<Vec<_>>())
        .unwrap_or_default();
    let url = client.segment_url(UPLOAD_PATH, segments)?;
    debug!(
        file = candidate.file_name(),
        size = candidate.size(),
        url = %url,
        "Uploading document"
    );

    let response = client
        .send(
            client
                .request_url(Method::POST, url)
                .multipart(build_form(candidate, workspaces)?),
        )
        .await?;

    let body = response.text().await?;
    let parsed: UploadResponse =
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    Ok(UploadedDocument {
        locations: parsed.documents.into_iter().map(|d| d.location).collect(),
    })
}
