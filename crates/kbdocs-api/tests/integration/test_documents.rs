//! Integration tests for document listing and batch removal

use kbdocs_api::{documents, ApiError};
use kbdocs_core::domain::{flatten_tree, DocumentSize};
use kbdocs_core::ports::IDocumentStore;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_list_documents_flattens_tree() {
    let (server, client) = common::setup().await;
    common::mount_documents(&server, common::sample_tree()).await;

    let tree = documents::list_documents(&client)
        .await
        .expect("list_documents failed");
    let files = flatten_tree(&tree);

    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "custom-documents/report.txt-a1.json",
            "custom-documents/employee-1.json",
            "hr/2024/employee-2.json",
        ]
    );
    assert_eq!(files[0].size, DocumentSize::Bytes(1234));
    assert_eq!(files[1].size, DocumentSize::Text("2KB".to_string()));
    assert_eq!(files[2].size, DocumentSize::Unknown);
    assert_eq!(files[0].logical_name(), "report.txt");
}

#[tokio::test]
async fn test_list_documents_unauthorized() {
    let (server, client) = common::setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/documents"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API Key"))
        .mount(&server)
        .await;

    let err = documents::list_documents(&client).await.unwrap_err();
    match err {
        ApiError::Unauthorized(body) => assert_eq!(body, "Invalid API Key"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_documents_malformed_body() {
    let (server, client) = common::setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = documents::list_documents(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_documents_without_local_files() {
    let (server, client) = common::setup().await;
    common::mount_documents(&server, serde_json::json!({})).await;

    let tree = documents::list_documents(&client).await.unwrap();
    assert!(flatten_tree(&tree).is_empty());
}

#[tokio::test]
async fn test_remove_documents_sends_names() {
    let (server, store) = common::setup_store().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/system/remove-documents"))
        .and(body_json(serde_json::json!({
            "names": ["custom-documents/a.json", "custom-documents/b.json"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Documents removed successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    store
        .remove_documents(&[
            "custom-documents/a.json".to_string(),
            "custom-documents/b.json".to_string(),
        ])
        .await
        .expect("remove_documents failed");
}

#[tokio::test]
async fn test_remove_documents_server_error_has_context() {
    let (server, store) = common::setup_store().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/system/remove-documents"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database locked"))
        .mount(&server)
        .await;

    let err = store
        .remove_documents(&["x.json".to_string()])
        .await
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to remove 1 documents"));
    assert!(message.contains("database locked"));
}
