//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront landing for the resolved store
//! GET  /api/store              - Resolved store as JSON
//! GET  /health                 - Liveness check (binary only)
//! GET  /health/ready           - Readiness check (binary only)
//! ```

pub mod api;
pub mod home;

use axum::{Router, http::Uri, routing::get};
use epaket_core::DomainDirectory;

use crate::error::AppError;
use crate::state::AppState;

/// Create the API routes router.
pub fn api_routes<D: DomainDirectory + 'static>() -> Router<AppState<D>> {
    Router::new().route("/store", get(api::store::current))
}

/// Create all routes for the storefront.
pub fn routes<D: DomainDirectory + 'static>() -> Router<AppState<D>> {
    Router::new()
        .route("/", get(home::index))
        .nest("/api", api_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}
