//! File import use case
//!
//! Orchestrates a full import run:
//! 1. Scan the local tree ([`UploadPlanner`])
//! 2. Drop files the store already holds ([`DeduplicationFilter`])
//! 3. Create every required folder, parents first
//! 4. Upload each file independently
//! 5. Optionally embed the uploaded documents into workspaces
//!
//! Every step runs sequentially. Folder, upload and embedding failures are
//! logged and reported but never abort the run.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::domain::{expand_folder_paths, FileNamed, UploadCandidate};
use crate::ports::{FolderOutcome, IDocumentStore};

use super::deduplicate::DeduplicationFilter;
use super::list_documents::ListDocumentsUseCase;
use super::plan_upload::UploadPlanner;

/// Uploads between progress log lines
const PROGRESS_INTERVAL: usize = 25;

/// Per-run switches layered over the configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Report the plan without creating folders or uploading
    pub dry_run: bool,
    /// Call update-embeddings for each workspace after uploading
    pub embed: bool,
}

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedUpload {
    pub file_name: String,
    pub folder: String,
    pub size: usize,
}

impl From<&UploadCandidate> for PlannedUpload {
    fn from(candidate: &UploadCandidate) -> Self {
        Self {
            file_name: candidate.file_name().to_string(),
            folder: candidate.target_folder_str().to_string(),
            size: candidate.size(),
        }
    }
}

/// Something that failed without stopping the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub item: String,
    pub reason: String,
}

/// Summary of an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub dry_run: bool,
    /// Files found by the scan
    pub scanned: usize,
    /// Files skipped because the store already holds them
    pub duplicates: usize,
    pub planned: Vec<PlannedUpload>,
    pub folders_created: usize,
    pub folders_existing: usize,
    pub folder_failures: Vec<ItemFailure>,
    pub uploaded: usize,
    pub upload_failures: Vec<ItemFailure>,
    /// Store locations of uploaded documents
    pub locations: Vec<String>,
    pub embedded_workspaces: Vec<String>,
    pub embed_failures: Vec<ItemFailure>,
    pub duration_ms: u64,
}

impl ImportReport {
    /// True when nothing failed
    pub fn is_clean(&self) -> bool {
        self.folder_failures.is_empty()
            && self.upload_failures.is_empty()
            && self.embed_failures.is_empty()
    }
}

/// Use case for importing a local tree into the document store
pub struct ImportFilesUseCase {
    store: Arc<dyn IDocumentStore + Send + Sync>,
}

impl ImportFilesUseCase {
    pub fn new(store: Arc<dyn IDocumentStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Runs the import described by `config`
    ///
    /// `options.dry_run` is combined with the configured dry-run flag.
    ///
    /// # Errors
    ///
    /// Returns an error only if the scan itself fails (missing or empty
    /// root, unreadable directory)
    pub async fn execute(&self, config: &Config, options: ImportOptions) -> Result<ImportReport> {
        let started = Instant::now();
        let dry_run = options.dry_run || config.import.dry_run;
        let root = config
            .import
            .file_path
            .as_deref()
            .context("No scan root configured")?;

        let candidates = UploadPlanner::from_config(&config.import).plan(root)?;
        let mut report = ImportReport {
            dry_run,
            scanned: candidates.len(),
            ..ImportReport::default()
        };

        let existing = ListDocumentsUseCase::new(self.store.clone())
            .inventory_or_empty()
            .await;
        let outcome = DeduplicationFilter::from_records(&existing).apply(candidates);
        report.duplicates = outcome.skipped.len();
        let candidates = outcome.kept;
        report.planned = candidates.iter().map(PlannedUpload::from).collect();

        if dry_run {
            info!(files = candidates.len(), "Dry run enabled, nothing uploaded");
            report.duration_ms = elapsed_ms(started);
            return Ok(report);
        }

        self.create_folders(&candidates, &mut report).await;
        self.upload_all(&candidates, config.import.workspaces_field(), &mut report)
            .await;

        if options.embed {
            self.embed(config, &mut report).await;
        }

        report.duration_ms = elapsed_ms(started);
        info!(
            uploaded = report.uploaded,
            total = candidates.len(),
            duration_ms = report.duration_ms,
            "Import finished"
        );
        Ok(report)
    }

    async fn create_folders(&self, candidates: &[UploadCandidate], report: &mut ImportReport) {
        let folders = expand_folder_paths(candidates);
        if folders.is_empty() {
            info!("No folders to create");
            return;
        }

        info!(count = folders.len(), "Creating folders");
        for folder in &folders {
            match self.store.create_folder(folder).await {
                Ok(FolderOutcome::Created) => {
                    info!(folder = %folder, "Created folder");
                    report.folders_created += 1;
                }
                Ok(FolderOutcome::AlreadyExists) => {
                    info!(folder = %folder, "Folder already exists");
                    report.folders_existing += 1;
                }
                Err(e) => {
                    let reason = format!("{e:#}");
                    error!(folder = %folder, error = %reason, "Failed to create folder");
                    report.folder_failures.push(ItemFailure {
                        item: folder.to_string(),
                        reason,
                    });
                }
            }
        }
    }

    async fn upload_all(
        &self,
        candidates: &[UploadCandidate],
        workspaces: Option<String>,
        report: &mut ImportReport,
    ) {
        let total = candidates.len();
        for candidate in candidates {
            let name = candidate.file_name();
            match self
                .store
                .upload_document(candidate, workspaces.as_deref())
                .await
            {
                Ok(uploaded) => {
                    report.uploaded += 1;
                    report.locations.extend(uploaded.locations);
                    info!(file = name, uploaded = report.uploaded, total, "Uploaded");
                    if report.uploaded % PROGRESS_INTERVAL == 0 {
                        info!("Progress: {}/{} files uploaded", report.uploaded, total);
                    }
                }
                Err(e) => {
                    let reason = format!("{e:#}");
                    error!(file = name, error = %reason, "Failed to upload");
                    report.upload_failures.push(ItemFailure {
                        item: name.to_string(),
                        reason,
                    });
                }
            }
        }
    }

    async fn embed(&self, config: &Config, report: &mut ImportReport) {
        if report.locations.is_empty() {
            info!("No files to embed");
            return;
        }

        let workspaces: Vec<String> = if config.import.workspaces.is_empty() {
            config.import.workspace_slug.iter().cloned().collect()
        } else {
            config.import.workspaces.clone()
        };
        if workspaces.is_empty() {
            warn!("No workspaces specified, skipping embedding");
            return;
        }

        for workspace in workspaces {
            match self
                .store
                .update_embeddings(&workspace, &report.locations)
                .await
            {
                Ok(()) => {
                    info!(
                        workspace = %workspace,
                        files = report.locations.len(),
                        "Embedded files in workspace"
                    );
                    report.embedded_workspaces.push(workspace);
                }
                Err(e) => {
                    let reason = format!("{e:#}");
                    error!(workspace = %workspace, error = %reason, "Failed to embed files");
                    report.embed_failures.push(ItemFailure {
                        item: workspace,
                        reason,
                    });
                }
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
