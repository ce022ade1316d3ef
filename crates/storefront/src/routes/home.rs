//! Storefront landing page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::middleware::OptionalStore;

/// Landing page for the resolved store.
///
/// Hostnames without a store get a neutral not-found page rather than an error.
#[instrument(skip_all)]
pub async fn index(OptionalStore(store): OptionalStore) -> Response {
    match store {
        Some(store) => format!("Welcome to {}", store.name).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            "Store not found. This domain is not connected to an E-Paket store.",
        )
            .into_response(),
    }
}
