//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including invalid folder paths, batch sizes and upload scan failures.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote folder path
    #[error("Invalid folder path: {0}")]
    InvalidFolderPath(String),

    /// Batch size must be at least one
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(usize),

    /// File extension filter entry is empty or malformed
    #[error("Invalid file extension: {0}")]
    InvalidExtension(String),

    /// Scan root does not exist or cannot be read
    #[error("Scan root not found: {0}")]
    ScanRootNotFound(String),

    /// Scan root is a directory with no entries
    #[error("Scan root is empty: {0}")]
    ScanRootEmpty(String),
}
