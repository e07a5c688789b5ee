//! In-memory port doubles shared by the use case tests

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use serde_json::json;

use crate::domain::{DocumentTree, FolderPath, UploadCandidate};
use crate::ports::{FolderOutcome, IConfirmation, IDocumentStore, UploadedDocument};

/// Recorded upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub file_name: String,
    pub folder: String,
    pub workspaces: Option<String>,
}

/// Document store that records every call and fails on demand
#[derive(Default)]
pub struct MockStore {
    pub tree: Option<serde_json::Value>,
    pub fail_list: bool,
    /// 1-based index of the remove call that fails
    pub fail_remove_call: Option<usize>,
    pub existing_folders: HashSet<String>,
    pub failing_folders: HashSet<String>,
    pub failing_uploads: HashSet<String>,
    pub failing_embeds: HashSet<String>,
    pub remove_calls: Mutex<Vec<Vec<String>>>,
    pub folder_calls: Mutex<Vec<String>>,
    pub upload_calls: Mutex<Vec<UploadCall>>,
    pub embed_calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose tree holds the given `(folder, name, id)` files
    pub fn with_files(files: &[(&str, &str, &str)]) -> Self {
        let mut folders: Vec<(String, Vec<serde_json::Value>)> = Vec::new();
        for (folder, name, id) in files {
            let node = json!({"name": name, "type": "file", "id": id, "size": 100});
            match folders.iter_mut().find(|(f, _)| f == folder) {
                Some((_, items)) => items.push(node),
                None => folders.push((folder.to_string(), vec![node])),
            }
        }
        let items: Vec<serde_json::Value> = folders
            .into_iter()
            .map(|(name, items)| json!({"name": name, "type": "folder", "items": items}))
            .collect();

        Self {
            tree: Some(json!({
                "localFiles": {"name": "documents", "type": "folder", "items": items}
            })),
            ..Self::default()
        }
    }

    pub fn removes(&self) -> Vec<Vec<String>> {
        self.remove_calls.lock().unwrap().clone()
    }

    pub fn folders(&self) -> Vec<String> {
        self.folder_calls.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<UploadCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    pub fn embeds(&self) -> Vec<(String, Vec<String>)> {
        self.embed_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IDocumentStore for MockStore {
    async fn list_documents(&self) -> anyhow::Result<DocumentTree> {
        if self.fail_list {
            bail!("connection refused");
        }
        match &self.tree {
            Some(tree) => Ok(serde_json::from_value(tree.clone())?),
            None => Ok(DocumentTree::default()),
        }
    }

    async fn remove_documents(&self, names: &[String]) -> anyhow::Result<()> {
        let mut calls = self.remove_calls.lock().unwrap();
        calls.push(names.to_vec());
        if self.fail_remove_call == Some(calls.len()) {
            bail!("HTTP 500: remove failed");
        }
        Ok(())
    }

    async fn create_folder(&self, folder: &FolderPath) -> anyhow::Result<FolderOutcome> {
        self.folder_calls
            .lock()
            .unwrap()
            .push(folder.as_str().to_string());
        if self.failing_folders.contains(folder.as_str()) {
            bail!("HTTP 500: folder failed");
        }
        if self.existing_folders.contains(folder.as_str()) {
            return Ok(FolderOutcome::AlreadyExists);
        }
        Ok(FolderOutcome::Created)
    }

    async fn upload_document(
        &self,
        candidate: &UploadCandidate,
        workspaces: Option<&str>,
    ) -> anyhow::Result<UploadedDocument> {
        use crate::domain::FileNamed;

        let name = candidate.file_name().to_string();
        self.upload_calls.lock().unwrap().push(UploadCall {
            file_name: name.clone(),
            folder: candidate.target_folder_str().to_string(),
            workspaces: workspaces.map(str::to_string),
        });
        if self.failing_uploads.contains(&name) {
            bail!("HTTP 500: upload failed");
        }
        Ok(UploadedDocument {
            locations: vec![format!("custom-documents/{name}-id.json")],
        })
    }

    async fn update_embeddings(&self, workspace: &str, adds: &[String]) -> anyhow::Result<()> {
        self.embed_calls
            .lock()
            .unwrap()
            .push((workspace.to_string(), adds.to_vec()));
        if self.failing_embeds.contains(workspace) {
            bail!("HTTP 404: workspace not found");
        }
        Ok(())
    }
}

/// Confirmation double answering with a fixed value and recording prompts
pub struct ScriptedConfirmation {
    pub answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl IConfirmation for ScriptedConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}
