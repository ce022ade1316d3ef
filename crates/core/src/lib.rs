//! E-Paket Core - Shared tenant types library.
//!
//! This crate provides the types used across all E-Paket components:
//! - `storefront` - Tenant-aware storefront server
//! - `cli` - Command-line tools for migrations and domain management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. Backends implement [`DomainDirectory`] elsewhere.
//!
//! # Modules
//!
//! - [`types`] - `Store`, hostname normalization, and directory record validation
//! - [`directory`] - The domain directory lookup contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod directory;
pub mod types;

pub use directory::{DirectoryError, DomainDirectory};
pub use types::*;
