//! kbdocs API - AnythingLLM document API client
//!
//! Provides an async client for the document endpoints of an AnythingLLM
//! server:
//! - Document tree listing and batch removal
//! - Folder creation
//! - Multipart document upload
//! - Workspace embedding updates
//!
//! ## Modules
//!
//! - [`client`] - Authenticated HTTP client and status mapping
//! - [`documents`] - `GET /documents` and batch delete
//! - [`folders`] - Folder creation
//! - [`upload`] - Multipart file upload
//! - [`workspace`] - Embedding updates
//! - [`provider`] - [`IDocumentStore`](kbdocs_core::ports::IDocumentStore) implementation

pub mod client;
pub mod documents;
pub mod folders;
pub mod provider;
pub mod upload;
pub mod workspace;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when communicating with the AnythingLLM API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API key is missing or invalid
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The API key lacks permission for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A server-side error occurred (5xx)
    #[error("Server error ({status}): {body}")]
    ServerError {
        status: StatusCode,
        body: String,
    },

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        status: StatusCode,
        body: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An endpoint URL could not be built from the server URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Maps a non-success status and its body to the matching variant
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(body),
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::CONFLICT => Self::Conflict(body),
            s if s.is_server_error() => Self::ServerError { status, body },
            _ => Self::Http { status, body },
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Conflict(_) => Some(StatusCode::CONFLICT),
            Self::ServerError { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            Self::InvalidResponse(_) | Self::InvalidUrl(_) => None,
        }
    }
}
