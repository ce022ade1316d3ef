//! Current store API.

use axum::Json;
use epaket_core::Store;

use crate::middleware::CurrentStore;

/// Return the store resolved for this request's hostname.
///
/// Responds `404 Store not found` when the hostname has no store.
pub async fn current(CurrentStore(store): CurrentStore) -> Json<Store> {
    Json(store)
}
