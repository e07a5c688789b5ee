//! Configuration module for kbdocs.
//!
//! Configuration lives in a `KEY=value` file (`#` lines are comments). It is
//! read once at startup into an immutable [`Config`] that is passed by
//! reference to every component, then checked with [`Config::validate`]
//! for the command about to run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::domain::{BatchSize, ExtensionSet};

// ---------------------------------------------------------------------------
// Recognized keys
// ---------------------------------------------------------------------------

pub const KEY_URL: &str = "ANYTHINGLLM_URL";
pub const KEY_API_KEY: &str = "ANYTHINGLLM_API_KEY";
pub const KEY_WORKSPACE_SLUG: &str = "WORKSPACE_SLUG";
pub const KEY_AGENT_NAME: &str = "AGENT_NAME";
pub const KEY_FILE_PATH: &str = "FILE_PATH";
pub const KEY_RECURSIVE: &str = "RECURSIVE";
pub const KEY_DRY_RUN: &str = "DRY_RUN";
pub const KEY_WORKSPACES: &str = "WORKSPACES";
pub const KEY_INCLUDED_FILE_TYPES: &str = "INCLUDED_FILE_TYPES";
pub const KEY_SMALL_BATCH: &str = "SMALL_BATCH";
pub const KEY_SMALL_BATCH_LIMIT: &str = "SMALL_BATCH_LIMIT";
pub const KEY_DELETE_BATCH_SIZE: &str = "DELETE_BATCH_SIZE";
pub const KEY_LOG_LEVEL: &str = "LOG_LEVEL";

/// Valid values for `LOG_LEVEL`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for kbdocs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub import: ImportConfig,
    pub cleanup: CleanupConfig,
    pub logging: LoggingConfig,
}

/// Document store connection settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerConfig {
    /// Base URL of the document store, e.g. `http://localhost:3001`.
    pub url: Option<String>,
    /// Static bearer token.
    #[serde(serialize_with = "redact")]
    pub api_key: Option<String>,
}

/// Local scan and upload settings.
#[derive(Debug, Clone, Serialize)]
pub struct ImportConfig {
    /// Root of the local tree to upload.
    pub file_path: Option<PathBuf>,
    /// Walk the whole subtree instead of direct children only.
    pub recursive: bool,
    /// Report what would be uploaded without touching the store.
    pub dry_run: bool,
    /// Primary workspace slug.
    pub workspace_slug: Option<String>,
    /// Workspaces that uploaded documents are added to.
    pub workspaces: Vec<String>,
    /// Extensions eligible for upload.
    pub included_file_types: ExtensionSet,
    /// Stop scanning after `small_batch_limit` files.
    pub small_batch: bool,
    pub small_batch_limit: usize,
}

/// Bulk delete settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupConfig {
    /// Documents per delete request.
    pub delete_batch_size: BatchSize,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            file_path: None,
            recursive: true,
            dry_run: false,
            workspace_slug: None,
            workspaces: Vec::new(),
            included_file_types: ExtensionSet::default(),
            small_batch: false,
            small_batch_limit: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ImportConfig {
    /// Cap on scanned files, present only in small-batch mode.
    pub fn scan_limit(&self) -> Option<usize> {
        self.small_batch.then_some(self.small_batch_limit)
    }

    /// Comma-joined workspace list as sent with uploads, if any.
    pub fn workspaces_field(&self) -> Option<String> {
        if self.workspaces.is_empty() {
            None
        } else {
            Some(self.workspaces.join(","))
        }
    }
}

fn redact<S: serde::Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => s.serialize_str("********"),
        None => s.serialize_none(),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Offending key, e.g. `"ANYTHINGLLM_URL"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration line: {0}")]
    Parse(String),

    #[error("Invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Default location of the configuration file, relative to the working
    /// directory.
    pub fn default_path() -> PathBuf {
        Path::new("data-handling")
            .join("dataImport")
            .join(".importFiles.env")
    }

    /// Load configuration from the key=value file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_content(&content)
    }

    /// Parse configuration from file content.
    ///
    /// Each line is split at its first `=`. Lines without one are ignored.
    /// Surrounding quotes are removed from values, everything else is taken
    /// literally (no `$VAR` expansion, no escapes), and the process
    /// environment is never read or modified.
    pub fn from_str_content(content: &str) -> Result<Self, ConfigError> {
        let literal: String = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .filter(|(key, _)| !key.trim().is_empty())
            .map(|(key, value)| {
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                format!("{}={}\n", key.trim(), quote_literal(value))
            })
            .collect();

        let mut entries = HashMap::new();
        for item in dotenvy::from_read_iter(literal.as_bytes()) {
            let (key, value) = item.map_err(|e| ConfigError::Parse(e.to_string()))?;
            entries.insert(key, value);
        }

        Self::from_entries(&entries)
    }

    /// Build a configuration from already-parsed key/value pairs.
    ///
    /// Unknown keys are ignored. Malformed values are all reported together.
    pub fn from_entries(entries: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        let mut config = Config::default();

        let get = |key: &str| {
            entries
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        config.server.url = get(KEY_URL).map(|u| u.trim_end_matches('/').to_string());
        config.server.api_key = get(KEY_API_KEY).map(str::to_string);

        config.import.file_path = get(KEY_FILE_PATH).map(PathBuf::from);
        config.import.workspace_slug = get(KEY_WORKSPACE_SLUG)
            .or_else(|| get(KEY_AGENT_NAME))
            .map(str::to_string);
        config.import.workspaces = get(KEY_WORKSPACES)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|ws| !ws.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(v) = get(KEY_RECURSIVE) {
            parse_bool_into(KEY_RECURSIVE, v, &mut config.import.recursive, &mut errors);
        }
        if let Some(v) = get(KEY_DRY_RUN) {
            parse_bool_into(KEY_DRY_RUN, v, &mut config.import.dry_run, &mut errors);
        }
        if let Some(v) = get(KEY_SMALL_BATCH) {
            parse_bool_into(KEY_SMALL_BATCH, v, &mut config.import.small_batch, &mut errors);
        }

        if let Some(v) = get(KEY_SMALL_BATCH_LIMIT) {
            match v.parse::<usize>() {
                Ok(limit) => config.import.small_batch_limit = limit,
                Err(_) => errors.push(ValidationError::new(
                    KEY_SMALL_BATCH_LIMIT,
                    format!("expected a non-negative integer, got '{v}'"),
                )),
            }
        }

        if let Some(v) = get(KEY_INCLUDED_FILE_TYPES) {
            match ExtensionSet::parse_list(v) {
                Ok(set) => config.import.included_file_types = set,
                Err(e) => errors.push(ValidationError::new(KEY_INCLUDED_FILE_TYPES, e.to_string())),
            }
        }

        if let Some(v) = get(KEY_DELETE_BATCH_SIZE) {
            match v.parse::<usize>().ok().map(BatchSize::new) {
                Some(Ok(size)) => config.cleanup.delete_batch_size = size,
                _ => errors.push(ValidationError::new(
                    KEY_DELETE_BATCH_SIZE,
                    format!("expected a positive integer, got '{v}'"),
                )),
            }
        }

        if let Some(v) = get(KEY_LOG_LEVEL) {
            config.logging.level = v.to_lowercase();
        }

        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

/// Quote `value` so the dotenv parser hands it back unchanged
fn quote_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn parse_bool_into(key: &str, value: &str, target: &mut bool, errors: &mut Vec<ValidationError>) {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => *target = true,
        "false" | "0" | "no" | "off" => *target = false,
        _ => errors.push(ValidationError::new(
            key,
            format!("expected true or false, got '{value}'"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Which command the configuration is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Listing, counting and deleting documents.
    Cleanup,
    /// Scanning and uploading a local tree.
    Import,
}

impl Config {
    /// Validate the configuration for `purpose` and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self, purpose: Purpose) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match self.server.url.as_deref() {
            None => errors.push(ValidationError::new(KEY_URL, "missing")),
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                errors.push(ValidationError::new(
                    KEY_URL,
                    format!("must start with http:// or https://, got '{url}'"),
                ))
            }
            Some(_) => {}
        }

        let needs_key = match purpose {
            Purpose::Cleanup => true,
            Purpose::Import => !self.import.dry_run,
        };
        if needs_key && self.server.api_key.is_none() {
            errors.push(ValidationError::new(KEY_API_KEY, "missing"));
        }

        if purpose == Purpose::Import {
            if self.import.file_path.is_none() {
                errors.push(ValidationError::new(KEY_FILE_PATH, "missing"));
            }
            if self.import.small_batch && self.import.small_batch_limit == 0 {
                errors.push(ValidationError::new(
                    KEY_SMALL_BATCH_LIMIT,
                    "must be greater than 0 when SMALL_BATCH is enabled",
                ));
            }
            if self.import.included_file_types.is_empty() {
                errors.push(ValidationError::new(KEY_INCLUDED_FILE_TYPES, "must not be empty"));
            }
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError::new(
                KEY_LOG_LEVEL,
                format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        errors
    }

    /// Like [`validate`](Self::validate) but fails on the first report.
    pub fn ensure_valid(&self, purpose: Purpose) -> Result<(), ConfigError> {
        let errors = self.validate(purpose);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Server URL, present after successful validation.
    pub fn server_url(&self) -> &str {
        self.server.url.as_deref().unwrap_or_default()
    }

    /// API key, empty when not configured.
    pub fn api_key(&self) -> &str {
        self.server.api_key.as_deref().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use kbdocs_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .server_url("http://localhost:3001")
///     .api_key("secret")
///     .file_path("/data/import")
///     .build();
/// assert!(config.import.recursive);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server.url = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.server.api_key = Some(key.into());
        self
    }

    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.import.file_path = Some(path.into());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.import.recursive = recursive;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.import.dry_run = dry_run;
        self
    }

    pub fn workspaces<I, S>(mut self, workspaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.import.workspaces = workspaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn included_file_types(mut self, types: ExtensionSet) -> Self {
        self.config.import.included_file_types = types;
        self
    }

    pub fn small_batch(mut self, limit: usize) -> Self {
        self.config.import.small_batch = true;
        self.config.import.small_batch_limit = limit;
        self
    }

    pub fn delete_batch_size(mut self, size: BatchSize) -> Self {
        self.config.cleanup.delete_batch_size = size;
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the final [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}
