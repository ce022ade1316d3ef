//! Core types for E-Paket.
//!
//! This module provides type-safe wrappers for tenant resolution concepts.

pub mod domain;
pub mod record;
pub mod store;

pub use domain::{CandidateSet, normalize_host};
pub use record::{RecordError, StoreRecord, display_name};
pub use store::{Store, StoreId, UNNAMED_STORE};
