//! AnythingLLM API client
//!
//! Provides a typed HTTP client for the AnythingLLM developer API.
//! Handles the bearer header, endpoint construction and status mapping.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kbdocs_api::client::ApiClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ApiClient::new("http://localhost:3001", "api-key-here");
//! let tree = kbdocs_api::documents::list_documents(&client).await?;
//! println!("{} top-level items", tree.local_files.map_or(0, |n| n.items.map_or(0, |i| i.len())));
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, warn};
use url::Url;

use crate::ApiError;

/// Path prefix of the developer API
pub const API_PREFIX: &str = "/api/v1";

/// HTTP client for AnythingLLM API calls
///
/// Wraps `reqwest::Client` with the bearer token and the server base URL.
/// Requests carry no explicit timeout and are never retried.
pub struct ApiClient {
    /// The underlying HTTP client
    client: Client,
    /// Server URL without trailing slash, e.g. `http://localhost:3001`
    base_url: String,
    /// Static API key
    api_key: String,
}

impl ApiClient {
    /// Creates a client for the server at `server_url`
    ///
    /// # Arguments
    /// * `server_url` - Server root; the `/api/v1` prefix is added per request
    /// * `api_key` - Bearer token
    pub fn new(server_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url, api_key)
    }

    /// Creates a client around an existing `reqwest::Client`
    pub fn with_client(
        client: Client,
        server_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Returns the server URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `/documents`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// URL for `path` with each of `segments` appended percent-encoded
    ///
    /// Used for endpoints that embed folder names or workspace slugs.
    pub fn segment_url<'a>(
        &self,
        path: &str,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url(path)).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Creates an authenticated request builder for an absolute URL
    pub fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url).bearer_auth(&self.api_key)
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path below `/api/v1` (e.g., "/documents")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&self.api_key)
    }

    /// Sends `request` and maps non-success statuses to [`ApiError`]
    ///
    /// The status and body of failed responses are logged.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        check_status(response).await
    }
}

/// Returns the response untouched on 2xx, otherwise an [`ApiError`] built
/// from its status and body
pub async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        debug!(status = status.as_u16(), url = %response.url(), "Request succeeded");
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), url = %url, body = %body, "Request failed");
    Err(ApiError::from_status(status, body))
}
