//! Remote document tree and flattened document records
//!
//! The document store describes its contents as a nested tree of folder and
//! file nodes rooted at `localFiles`. Most operations only care about the
//! files, so the tree is flattened into [`DocumentRecord`]s whose `path` is
//! the `/`-joined chain of ancestor names.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Response body of the document listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    /// Root node of the tree; absent when the store has never been populated
    pub local_files: Option<DocumentNode>,
}

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
    #[serde(other)]
    Other,
}

/// A single node of the remote document tree
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub size: Option<serde_json::Value>,
    #[serde(default)]
    pub items: Option<Vec<DocumentNode>>,
}

/// Size as reported by the store, which is not always numeric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DocumentSize {
    Bytes(u64),
    Text(String),
    Unknown,
}

impl DocumentSize {
    fn from_value(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => match n.as_u64() {
                Some(bytes) => Self::Bytes(bytes),
                None => Self::Text(n.to_string()),
            },
            Some(serde_json::Value::String(s)) => Self::Text(s.clone()),
            _ => Self::Unknown,
        }
    }
}

impl Display for DocumentSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "{bytes}"),
            Self::Text(text) => write!(f, "{text}"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A file stored remotely, as found in the flattened document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Stored file name, including the store-generated suffix
    pub name: String,
    /// Opaque identifier assigned by the store
    pub id: String,
    /// `/`-joined ancestor chain ending with `name`
    pub path: String,
    pub size: DocumentSize,
}

impl DocumentRecord {
    /// Folder containing this document, or `None` at the top level
    #[must_use]
    pub fn folder(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(folder, _)| folder)
    }

    /// Name the document was uploaded under
    ///
    /// The store appends `-<id>.json` to every processed document, so
    /// `notes.txt` is stored as `notes.txt-<id>.json`. Exactly that suffix is
    /// removed; names without it pass through unchanged. A JSON upload
    /// `report.json` is stored as `report-<id>.json` and cleans to `report`,
    /// see [`DocumentRecord::uploaded_names`].
    #[must_use]
    pub fn logical_name(&self) -> &str {
        if self.id.is_empty() {
            return &self.name;
        }

        let suffix = format!("-{}.json", self.id);
        self.name.strip_suffix(&suffix).unwrap_or(&self.name)
    }

    /// Local file names this record may have been uploaded from
    ///
    /// The cleaned name itself, plus the cleaned name with `.json` appended
    /// when the suffix was present, since the store drops the extension of
    /// JSON uploads before adding its own.
    pub fn uploaded_names(&self) -> Vec<String> {
        let logical = self.logical_name();
        if logical.len() == self.name.len() {
            vec![logical.to_string()]
        } else {
            vec![logical.to_string(), format!("{logical}.json")]
        }
    }
}

/// Anything that can be compared by its base file name
pub trait FileNamed {
    fn file_name(&self) -> &str;
}

impl FileNamed for DocumentRecord {
    fn file_name(&self) -> &str {
        &self.name
    }
}

impl FileNamed for String {
    fn file_name(&self) -> &str {
        self
    }
}

/// Flatten the document tree into file records, depth first
///
/// Folder nodes contribute no entry. Folders without `items` are treated as
/// empty, and nodes of any other kind are skipped.
#[must_use]
pub fn flatten_tree(tree: &DocumentTree) -> Vec<DocumentRecord> {
    let mut files = Vec::new();
    if let Some(root) = &tree.local_files {
        if let Some(items) = &root.items {
            collect_files(items, "", &mut files);
        }
    }
    files
}

fn collect_files(items: &[DocumentNode], parent: &str, out: &mut Vec<DocumentRecord>) {
    for node in items {
        let path = if parent.is_empty() {
            node.name.clone()
        } else {
            format!("{parent}/{}", node.name)
        };

        match node.kind {
            NodeKind::File => out.push(DocumentRecord {
                name: node.name.clone(),
                id: node.id.clone().unwrap_or_default(),
                path,
                size: DocumentSize::from_value(node.size.as_ref()),
            }),
            NodeKind::Folder => {
                if let Some(children) = &node.items {
                    collect_files(children, &path, out);
                }
            }
            NodeKind::Other => {}
        }
    }
}
