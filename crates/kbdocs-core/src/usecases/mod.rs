//! Use cases (interactors) for kbdocs
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate business rules to domain methods and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`ListDocumentsUseCase`] - Remote inventory, flattened into file records
//! - [`DeduplicationFilter`] - Drops candidates the store already holds
//! - [`BatchDeleteUseCase`] - Sequential batched deletes, abort on first failure
//! - [`DeleteByPatternUseCase`] - Confirmed deletion of name-matched documents
//! - [`UploadPlanner`] - Local directory scan into upload candidates
//! - [`ImportFilesUseCase`] - Folder creation, upload and embedding

pub mod deduplicate;
pub mod delete_documents;
pub mod delete_pattern;
pub mod import_files;
pub mod list_documents;
pub mod plan_upload;

#[cfg(test)]
pub(crate) mod test_support;

pub use deduplicate::{DedupOutcome, DeduplicationFilter};
pub use delete_documents::{BatchDeleteReport, BatchDeleteUseCase};
pub use delete_pattern::{DeleteByPatternUseCase, PatternDeleteOutcome};
pub use import_files::{ImportFilesUseCase, ImportOptions, ImportReport, ItemFailure, PlannedUpload};
pub use list_documents::{count_by_folder, filter_by_pattern, ListDocumentsUseCase, ROOT_FOLDER_LABEL};
pub use plan_upload::UploadPlanner;
