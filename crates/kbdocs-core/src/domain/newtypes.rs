//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for domain values.
//! Each newtype ensures data validity at construction time.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::path::{Component, Path};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// FolderPath
// ============================================================================

/// A remote folder path, relative to the document store root
///
/// Segments are joined with `/`, e.g. `"reports/2024/q1"`. The top-level
/// folder is not representable; callers use `Option<FolderPath>` for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FolderPath(String);

impl FolderPath {
    /// Create a new FolderPath
    ///
    /// Backslashes are accepted as separators and normalized to `/`.
    ///
    /// # Errors
    /// Returns error if the path is empty, absolute, or contains empty,
    /// `.` or `..` segments
    pub fn new(path: String) -> Result<Self, DomainError> {
        let normalized = path.replace('\\', "/");

        if normalized.is_empty() {
            return Err(DomainError::InvalidFolderPath(
                "Folder path cannot be empty".to_string(),
            ));
        }

        if normalized.starts_with('/') {
            return Err(DomainError::InvalidFolderPath(format!(
                "Folder path must be relative: {path}"
            )));
        }

        for segment in normalized.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(DomainError::InvalidFolderPath(format!(
                    "Folder path contains invalid segment '{segment}': {path}"
                )));
            }
        }

        Ok(Self(normalized))
    }

    /// Build a FolderPath from a relative filesystem path
    ///
    /// Returns `Ok(None)` for an empty relative path (the scan root itself).
    ///
    /// # Errors
    /// Returns error if the path has a root, prefix or parent component
    pub fn from_relative(relative: &Path) -> Result<Option<Self>, DomainError> {
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => {
                    return Err(DomainError::InvalidFolderPath(format!(
                        "Not a relative folder: {}",
                        relative.display()
                    )))
                }
            }
        }

        if segments.is_empty() {
            return Ok(None);
        }

        Self::new(segments.join("/")).map(Some)
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }


    /// Every prefix of this path, shortest first, including the path itself
    ///
    /// `"a/b/c"` yields `["a", "a/b", "a/b/c"]`.
    #[must_use]
    pub fn prefixes(&self) -> Vec<FolderPath> {
        let segments: Vec<&str> = self.segments().collect();
        (1..=segments.len())
            .map(|len| Self(segments[..len].join("/")))
            .collect()
    }
}

impl Display for FolderPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FolderPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for FolderPath {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FolderPath> for String {
    fn from(path: FolderPath) -> Self {
        path.0
    }
}

// ============================================================================
// BatchSize
// ============================================================================

/// Number of documents carried by a single delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BatchSize(usize);

impl BatchSize {
    /// Default number of documents per delete request
    pub const DEFAULT: Self = Self(10);

    /// Batch size used for single-document deletes
    pub const SINGLE: Self = Self(1);

    /// Create a new BatchSize
    ///
    /// # Errors
    /// Returns error if `size` is zero
    pub fn new(size: usize) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::InvalidBatchSize(size));
        }
        Ok(Self(size))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for BatchSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for BatchSize {
    type Error = DomainError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<BatchSize> for usize {
    fn from(size: BatchSize) -> Self {
        size.0
    }
}

// ============================================================================
// ExtensionSet
// ============================================================================

/// Default extensions accepted for upload
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "json", "xml", "csv"];

/// Set of allowed file extensions, stored lowercase without a leading dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    /// Create an ExtensionSet from raw entries such as `"TXT"`, `".json"`
    ///
    /// # Errors
    /// Returns error if any entry is empty after trimming
    pub fn new<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for entry in entries {
            let raw = entry.as_ref();
            let normalized = raw.trim().trim_start_matches('.').to_lowercase();
            if normalized.is_empty() || normalized.contains('/') {
                return Err(DomainError::InvalidExtension(raw.to_string()));
            }
            set.insert(normalized);
        }
        Ok(Self(set))
    }

    /// Parse a comma-separated list, e.g. `"txt,json,xml,csv"`
    ///
    /// # Errors
    /// Returns error if any entry is empty
    pub fn parse_list(list: &str) -> Result<Self, DomainError> {
        Self::new(list.split(','))
    }

    /// Case-insensitive membership test for a file extension
    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(&extension.to_lowercase())
    }

    /// Whether the file at `path` has an allowed extension
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| self.contains(&ext.to_string_lossy()))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self(DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect())
    }
}

impl Display for ExtensionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(","))
    }
}

impl TryFrom<Vec<String>> for ExtensionSet {
    type Error = DomainError;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ExtensionSet> for Vec<String> {
    fn from(set: ExtensionSet) -> Self {
        set.0.into_iter().collect()
    }
}
