//! Shared test helpers for AnythingLLM API integration tests
//!
//! Each helper mounts the necessary mock endpoints on a wiremock server.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kbdocs_api::client::ApiClient;
use kbdocs_api::provider::AnythingLlmStore;

pub const API_KEY: &str = "test-api-key";

/// Starts a mock server and returns it with a client pointing at it
pub async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(server.uri(), API_KEY);
    (server, client)
}

/// Same as [`setup`] but wrapped in the store adapter
#[allow(dead_code)]
pub async fn setup_store() -> (MockServer, AnythingLlmStore) {
    let (server, client) = setup().await;
    (server, AnythingLlmStore::new(client))
}

/// Sample tree: two documents under `custom-documents`, one nested folder
pub fn sample_tree() -> serde_json::Value {
    serde_json::json!({
        "localFiles": {
            "name": "documents",
            "type": "folder",
            "items": [
                {
                    "name": "custom-documents",
                    "type": "folder",
                    "items": [
                        {"name": "report.txt-a1.json", "type": "file", "id": "a1", "size": 1234},
                        {"name": "employee-1.json", "type": "file", "id": "b2", "size": "2KB"}
                    ]
                },
                {
                    "name": "hr",
                    "type": "folder",
                    "items": [
                        {
                            "name": "2024",
                            "type": "folder",
                            "items": [
                                {"name": "employee-2.json", "type": "file", "id": "c3"}
                            ]
                        }
                    ]
                }
            ]
        }
    })
}

/// Mounts `GET /api/v1/documents` returning `tree`
pub async fn mount_documents(server: &MockServer, tree: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/documents"))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree))
        .mount(server)
        .await;
}

/// Mounts `POST /api/v1/document/create-folder` answering with `status`
#[allow(dead_code)]
pub async fn mount_create_folder(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/api/v1/document/create-folder"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "success": status == 200,
            "message": null
        })))
        .mount(server)
        .await;
}

/// Mounts an upload endpoint at `upload_path` returning one document location
#[allow(dead_code)]
pub async fn mount_upload(server: &MockServer, upload_path: &str, location: &str) {
    Mock::given(method("POST"))
        .and(path(upload_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "error": null,
            "documents": [{"location": location}]
        })))
        .mount(server)
        .await;
}
