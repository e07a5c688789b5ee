//! Duplicate filtering against the names already held by the store
//!
//! Matching is by base file name only, exact and case-sensitive. Remote
//! names are expanded with [`DocumentRecord::uploaded_names`] first. Target
//! folders are ignored, so equally named files in different folders collide.

use std::collections::HashSet;

use tracing::info;

use crate::domain::{DocumentRecord, FileNamed};

/// Candidates split into those to keep and those already present remotely
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome<T> {
    pub kept: Vec<T>,
    pub skipped: Vec<T>,
}

/// Filters candidates whose name is already known to the store
#[derive(Debug, Clone, Default)]
pub struct DeduplicationFilter {
    existing: HashSet<String>,
}

impl DeduplicationFilter {
    /// Filter over already-cleaned names
    pub fn new<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            existing: existing.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter over every name the remote records may have been uploaded as
    pub fn from_records(records: &[DocumentRecord]) -> Self {
        Self::new(records.iter().flat_map(DocumentRecord::uploaded_names))
    }

    pub fn len(&self) -> usize {
        self.existing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.existing.is_empty()
    }

    /// Whether a file with this base name already exists remotely
    pub fn is_duplicate(&self, file_name: &str) -> bool {
        self.existing.contains(base_name(file_name))
    }

    /// Remove already-present candidates, preserving order
    pub fn apply<T: FileNamed>(&self, candidates: Vec<T>) -> DedupOutcome<T> {
        let (skipped, kept): (Vec<T>, Vec<T>) = candidates
            .into_iter()
            .partition(|c| self.is_duplicate(c.file_name()));

        if !skipped.is_empty() {
            info!(skipped = skipped.len(), "Skipped duplicate files");
        }

        DedupOutcome { kept, skipped }
    }
}

/// Last path component of `name`, accepting either separator
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
