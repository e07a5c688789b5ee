//! Upload candidates built from a local directory scan

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::document::FileNamed;
use super::newtypes::FolderPath;

/// A local file queued for upload
///
/// Created during the directory scan, consumed once by the upload step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    local_path: PathBuf,
    file_name: String,
    content: Vec<u8>,
    target_folder: Option<FolderPath>,
}

impl UploadCandidate {
    pub fn new(local_path: PathBuf, content: Vec<u8>, target_folder: Option<FolderPath>) -> Self {
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            local_path,
            file_name,
            content,
            target_folder,
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Remote folder, `None` for the top level
    pub fn target_folder(&self) -> Option<&FolderPath> {
        self.target_folder.as_ref()
    }

    /// Remote folder as a string, empty for the top level
    pub fn target_folder_str(&self) -> &str {
        self.target_folder.as_ref().map_or("", FolderPath::as_str)
    }

    /// Lowercase extension without the dot
    pub fn extension(&self) -> Option<String> {
        self.local_path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// MIME type sent with the multipart file part
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("json") => "application/json",
            Some("xml") => "application/xml",
            Some("csv") => "text/csv",
            _ => "text/plain",
        }
    }
}

impl FileNamed for UploadCandidate {
    fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Every folder that must exist before the candidates can be uploaded
///
/// Includes each target folder and all of its ancestors, sorted and
/// deduplicated so parents always precede their children.
#[must_use]
pub fn expand_folder_paths(candidates: &[UploadCandidate]) -> Vec<FolderPath> {
    candidates
        .iter()
        .filter_map(UploadCandidate::target_folder)
        .flat_map(FolderPath::prefixes)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
