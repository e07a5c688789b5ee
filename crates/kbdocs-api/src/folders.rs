//! Folder creation: `POST /api/v1/document/create-folder`

use kbdocs_core::domain::FolderPath;
use kbdocs_core::ports::FolderOutcome;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::ApiError;

#[derive(Debug, Serialize)]
struct CreateFolderRequest<'a> {
    name: &'a str,
}

/// Creates `folder`; a 409 response means it already exists
pub async fn create_folder(client: &ApiClient, folder: &FolderPath) -> Result<FolderOutcome, ApiError> {
    debug!(folder = %folder, "Creating folder");

    let request = client
        .request(Method::POST, "/document/create-folder")
        .json(&CreateFolderRequest {
            name: folder.as_str(),
        });

    match client.send(request).await {
        Ok(_) => Ok(FolderOutcome::Created),
        Err(ApiError::Conflict(_)) => Ok(FolderOutcome::AlreadyExists),
        Err(e) => Err(e),
    }
}
