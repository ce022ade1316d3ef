//! Business logic services.

pub mod store_resolver;

pub use store_resolver::{ResolveError, StoreResolver};
