//! JSON API routes.

pub mod store;
