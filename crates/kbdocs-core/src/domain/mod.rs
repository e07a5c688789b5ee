//! Domain entities and business logic
//!
//! This module contains the core domain types for kbdocs:
//! - Newtypes for validated folder paths, batch sizes and extension filters
//! - The remote document tree and its flattened file records
//! - Upload candidates produced by a local directory scan
//! - Batch partitioning helpers
//! - Domain-specific error types

pub mod batch;
pub mod document;
pub mod errors;
pub mod newtypes;
pub mod upload;

// Re-export commonly used types
pub use batch::{dedup_names, partition_batches};
pub use document::{
    flatten_tree, DocumentNode, DocumentRecord, DocumentSize, DocumentTree, FileNamed, NodeKind,
};
pub use errors::DomainError;
pub use newtypes::*;
pub use upload::{expand_folder_paths, UploadCandidate};
