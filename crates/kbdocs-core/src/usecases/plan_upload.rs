//! Upload planning: local directory scan
//!
//! Walks the scan root and turns every file with an allowed extension into
//! an [`UploadCandidate`] whose target folder mirrors the file's directory
//! relative to the root. Symlinks to files are uploaded like regular files;
//! symlinked directories are not descended into.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ImportConfig;
use crate::domain::{DomainError, ExtensionSet, FolderPath, UploadCandidate};

/// Scans a local tree for files to upload
#[derive(Debug, Clone)]
pub struct UploadPlanner {
    extensions: ExtensionSet,
    recursive: bool,
    limit: Option<usize>,
}

impl UploadPlanner {
    pub fn new(extensions: ExtensionSet, recursive: bool, limit: Option<usize>) -> Self {
        Self {
            extensions,
            recursive,
            limit,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(
            config.included_file_types.clone(),
            config.recursive,
            config.scan_limit(),
        )
    }

    /// Builds the upload candidates under `root`
    ///
    /// Recursive mode walks the whole subtree; otherwise only direct children
    /// are considered. A root that is a single file yields at most that file.
    /// With a limit, scanning stops as soon as that many candidates exist.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ScanRootNotFound`] if `root` does not exist and
    /// [`DomainError::ScanRootEmpty`] if it is a directory without entries
    pub fn plan(&self, root: &Path) -> Result<Vec<UploadCandidate>> {
        info!(root = %root.display(), recursive = self.recursive, "Building file list");
        if let Some(limit) = self.limit {
            info!(limit, "Small batch mode enabled");
        }

        if !root.exists() {
            return Err(DomainError::ScanRootNotFound(root.display().to_string()).into());
        }

        if root.is_file() {
            return self.plan_single_file(root);
        }

        let mut entries = std::fs::read_dir(root)
            .with_context(|| format!("Failed to read scan root {}", root.display()))?;
        if entries.next().is_none() {
            return Err(DomainError::ScanRootEmpty(root.display().to_string()).into());
        }

        let candidates = if self.recursive {
            self.plan_recursive(root)
        } else {
            self.plan_direct_children(root)?
        };

        info!(count = candidates.len(), "File list built");
        Ok(candidates)
    }

    fn limit_reached(&self, count: usize) -> bool {
        match self.limit {
            Some(limit) if count >= limit => {
                info!(limit, "Reached small batch limit");
                true
            }
            _ => false,
        }
    }

    fn plan_single_file(&self, path: &Path) -> Result<Vec<UploadCandidate>> {
        if self.limit_reached(0) || !self.extensions.matches(path) {
            return Ok(Vec::new());
        }
        Ok(read_candidate(path.to_path_buf(), None).into_iter().collect())
    }

    fn plan_recursive(&self, root: &Path) -> Vec<UploadCandidate> {
        let mut candidates = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.path().is_file() {
                continue;
            }
            if self.limit_reached(candidates.len()) {
                break;
            }
            if !self.extensions.matches(entry.path()) {
                debug!(path = %entry.path().display(), "Extension not included");
                continue;
            }

            let relative = entry
                .path()
                .parent()
                .and_then(|parent| parent.strip_prefix(root).ok())
                .unwrap_or_else(|| Path::new(""));
            let folder = match FolderPath::from_relative(relative) {
                Ok(folder) => folder,
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Skipping file");
                    continue;
                }
            };

            candidates.extend(read_candidate(entry.into_path(), folder));
        }

        candidates
    }

    fn plan_direct_children(&self, root: &Path) -> Result<Vec<UploadCandidate>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(root)
            .with_context(|| format!("Failed to read scan root {}", root.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        paths.sort();

        let mut candidates = Vec::new();
        for path in paths {
            if self.limit_reached(candidates.len()) {
                break;
            }
            if !path.is_file() || !self.extensions.matches(&path) {
                continue;
            }
            candidates.extend(read_candidate(path, None));
        }

        Ok(candidates)
    }
}

/// Reads a file into a candidate; unreadable files are logged and skipped
fn read_candidate(path: PathBuf, folder: Option<FolderPath>) -> Option<UploadCandidate> {
    match std::fs::read(&path) {
        Ok(content) => Some(UploadCandidate::new(path, content, folder)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read file, skipping");
            None
        }
    }
}
