//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IDocumentStore`] - Remote document store operations (AnythingLLM)
//! - [`IConfirmation`] - Operator approval before destructive actions

pub mod confirmation;
pub mod document_store;

pub use confirmation::{AlwaysConfirm, IConfirmation};
pub use document_store::{FolderOutcome, IDocumentStore, UploadedDocument};
