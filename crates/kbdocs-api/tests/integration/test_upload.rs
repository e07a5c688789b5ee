//! Integration tests for multipart upload and workspace embedding

use kbdocs_api::{upload, workspace, ApiError};
use kbdocs_core::domain::{FolderPath, UploadCandidate};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn candidate(name: &str, content: &[u8], folder: Option<&str>) -> UploadCandidate {
    UploadCandidate::new(
        name.into(),
        content.to_vec(),
        folder.map(|f| FolderPath::new(f.to_string()).unwrap()),
    )
}

#[tokio::test]
async fn test_upload_to_top_level() {
    let (server, client) = common::setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/document/upload"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_string_contains("name=\"file\"; filename=\"report.txt\""))
        .and(body_string_contains("Content-Type: text/plain"))
        .and(body_string_contains("quarterly numbers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "documents": [{"location": "custom-documents/report.txt-1.json"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = upload::upload_document(
        &client,
        &candidate("report.txt", b"quarterly numbers", None),
        None,
    )
    .await
    .expect("upload failed");

    assert_eq!(uploaded.locations, vec!["custom-documents/report.txt-1.json"]);
}

#[tokio::test]
async fn test_upload_into_nested_folder_with_workspaces() {
    let (server, client) = common::setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/document/upload/hr/2024"))
        .and(body_string_contains("name=\"addToWorkspaces\""))
        .and(body_string_contains("wwiz,zoo"))
        .and(body_string_contains("Content-Type: application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "documents": [{"location": "hr/2024/employee-2.json-c3.json"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = upload::upload_document(
        &client,
        &candidate("employee-2.json", b"{}", Some("hr/2024")),
        Some("wwiz,zoo"),
    )
    .await
    .unwrap();
    assert_eq!(uploaded.locations.len(), 1);
}

#[tokio::test]
async fn test_upload_folder_segments_are_encoded() {
    let (server, client) = common::setup().await;
    common::mount_upload(
        &server,
        "/api/v1/document/upload/team%20notes",
        "team notes/a.txt-1.json",
    )
    .await;

    let uploaded = upload::upload_document(
        &client,
        &candidate("a.txt", b"a", Some("team notes")),
        None,
    )
    .await
    .unwrap();
    assert_eq!(uploaded.locations, vec!["team notes/a.txt-1.json"]);
}

#[tokio::test]
async fn test_upload_rejected() {
    let (server, client) = common::setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/document/upload"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unsupported file"))
        .mount(&server)
        .await;

    let err = upload::upload_document(&client, &candidate("x.txt", b"x", None), None)
        .await
        .unwrap_err();
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status.as_u16(), 422);
            assert_eq!(body, "unsupported file");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_embeddings() {
    let (server, client) = common::setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workspace/wwiz/update-embeddings"))
        .and(body_json(serde_json::json!({
            "adds": ["custom-documents/report.txt-1.json"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "workspace": {"slug": "wwiz"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    workspace::update_embeddings(
        &client,
        "wwiz",
        &["custom-documents/report.txt-1.json".to_string()],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_update_embeddings_unknown_workspace() {
    let (server, client) = common::setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workspace/nope/update-embeddings"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Workspace not found"))
        .mount(&server)
        .await;

    let err = workspace::update_embeddings(&client, "nope", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
