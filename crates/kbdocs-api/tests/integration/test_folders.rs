//! Integration tests for folder creation

use kbdocs_api::{folders, ApiError};
use kbdocs_core::domain::FolderPath;
use kbdocs_core::ports::FolderOutcome;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn folder(path: &str) -> FolderPath {
    FolderPath::new(path.to_string()).unwrap()
}

#[tokio::test]
async fn test_create_folder_sends_full_path() {
    let (server, client) = common::setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/document/create-folder"))
        .and(body_json(serde_json::json!({"name": "hr/2024"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = folders::create_folder(&client, &folder("hr/2024"))
        .await
        .unwrap();
    assert_eq!(outcome, FolderOutcome::Created);
}

#[tokio::test]
async fn test_existing_folder_is_not_an_error() {
    let (server, client) = common::setup().await;
    common::mount_create_folder(&server, 409).await;

    let outcome = folders::create_folder(&client, &folder("hr")).await.unwrap();
    assert_eq!(outcome, FolderOutcome::AlreadyExists);
}

#[tokio::test]
async fn test_other_failures_surface() {
    let (server, client) = common::setup().await;
    common::mount_create_folder(&server, 400).await;

    let err = folders::create_folder(&client, &folder("hr")).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}
