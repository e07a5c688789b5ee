//! End-to-end import and cleanup through the store adapter
//!
//! Drives the core use cases against a wiremock server to check that the
//! request sequence matches what the server expects.

use std::fs;
use std::sync::Arc;

use kbdocs_core::config::ConfigBuilder;
use kbdocs_core::domain::{BatchSize, ExtensionSet};
use kbdocs_core::ports::AlwaysConfirm;
use kbdocs_core::usecases::{
    BatchDeleteUseCase, DeleteByPatternUseCase, ImportFilesUseCase, ImportOptions,
    PatternDeleteOutcome,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_import_skips_existing_and_embeds() {
    let (server, store) = common::setup_store().await;
    common::mount_documents(&server, common::sample_tree()).await;
    common::mount_create_folder(&server, 200).await;
    common::mount_upload(&server, "/api/v1/document/upload/sub", "sub/notes.txt-9.json").await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workspace/wwiz/update-embeddings"))
        .and(body_json(serde_json::json!({"adds": ["sub/notes.txt-9.json"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    // already present remotely as report.txt-a1.json
    fs::write(dir.path().join("report.txt"), b"old").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("notes.txt"), b"new").unwrap();

    let config = ConfigBuilder::new()
        .server_url(server.uri())
        .api_key(common::API_KEY)
        .file_path(dir.path())
        .included_file_types(ExtensionSet::parse_list("txt").unwrap())
        .workspaces(["wwiz"])
        .build();

    let report = ImportFilesUseCase::new(Arc::new(store))
        .execute(
            &config,
            ImportOptions {
                dry_run: false,
                embed: true,
            },
        )
        .await
        .expect("import failed");

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.scanned, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.folders_created, 1);
    assert_eq!(report.uploaded, 1);
    assert_eq!(report.embedded_workspaces, vec!["wwiz"]);
}

#[tokio::test]
async fn test_batched_delete_stops_after_failure() {
    let (server, store) = common::setup_store().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/system/remove-documents"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/system/remove-documents"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let names: Vec<String> = (0..5).map(|i| format!("custom-documents/f{i}.json")).collect();
    let report = BatchDeleteUseCase::new(Arc::new(store))
        .execute(&names, BatchSize::new(2).unwrap())
        .await;

    assert!(!report.is_success());
    assert_eq!(report.completed_batches, 1);
    assert_eq!(report.total_batches, 3);
    assert_eq!(report.deleted, 2);
}

#[tokio::test]
async fn test_pattern_delete_sends_matching_paths() {
    let (server, store) = common::setup_store().await;
    common::mount_documents(&server, common::sample_tree()).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/system/remove-documents"))
        .and(body_json(serde_json::json!({
            "names": ["custom-documents/employee-1.json", "hr/2024/employee-2.json"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let usecase = DeleteByPatternUseCase::new(Arc::new(store), Arc::new(AlwaysConfirm));
    let matches = usecase.find_matches("employee").await.unwrap();
    let outcome = usecase.delete_matches(&matches, BatchSize::DEFAULT).await;

    match outcome {
        PatternDeleteOutcome::Completed(report) => assert!(report.is_success()),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
