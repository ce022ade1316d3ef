//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added by the binary)
//! 2. `TraceLayer` (request span with `request_id` and `store_id` fields)
//! 3. Request ID (add unique ID to each request)
//! 4. Store context (resolve the tenant store from the request hostname)

pub mod request_id;
pub mod store_context;

pub use request_id::request_id_middleware;
pub use store_context::{
    CurrentStore, OptionalStore, ResolvedStore, ambient_hostname, store_context_middleware,
};
