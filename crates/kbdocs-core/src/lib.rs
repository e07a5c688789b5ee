//! kbdocs Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `DocumentRecord`, `UploadCandidate`, `FolderPath`, `BatchSize`
//! - **Use cases** - inventory, deduplication, batched deletion, upload planning and import
//! - **Port definitions** - Traits for adapters: `IDocumentStore`, `IConfirmation`
//! - **Configuration** - key=value file loading and validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
