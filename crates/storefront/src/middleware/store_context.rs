//! Tenant store context for each request.
//!
//! The storefront serves many tenants from one process. Every routed request
//! is mapped to at most one store by its hostname before it reaches a handler.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn handler(CurrentStore(store): CurrentStore) -> String {
//!     format!("Welcome to {}", store.name)
//! }
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Uri, header, request::Parts, uri::Authority},
    middleware::Next,
    response::Response,
};
use epaket_core::{DomainDirectory, Store};
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Header set by reverse proxies carrying the client-facing host.
pub const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

/// Outcome of store resolution for the current request, stored in request extensions.
#[derive(Debug, Clone)]
pub struct ResolvedStore(pub Option<Store>);

/// Read the hostname the client addressed, without port.
///
/// Order: `X-Forwarded-Host` (only if `trust_forwarded_host`), the `Host`
/// header, then the request URI authority. Returns `None` when no usable
/// hostname is present.
#[must_use]
pub fn ambient_hostname(
    headers: &HeaderMap,
    uri: &Uri,
    trust_forwarded_host: bool,
) -> Option<String> {
    let forwarded = if trust_forwarded_host {
        headers
            .get(FORWARDED_HOST_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.split(',').next())
            .map(str::trim)
            .filter(|h| !h.is_empty())
    } else {
        None
    };

    let raw = forwarded
        .or_else(|| headers.get(header::HOST).and_then(|h| h.to_str().ok()))
        .or_else(|| uri.authority().map(Authority::as_str))?;

    let authority: Authority = raw.trim().parse().ok()?;
    let host = authority.host();
    (!host.is_empty()).then(|| host.to_owned())
}

/// Middleware that resolves the tenant store and makes it available to handlers.
///
/// The store ID is:
/// 1. Recorded in the current tracing span
/// 2. Added to the Sentry scope as a tag
pub async fn store_context_middleware<D>(
    State(state): State<AppState<D>>,
    mut request: Request,
    next: Next,
) -> Response
where
    D: DomainDirectory + 'static,
{
    let hostname = ambient_hostname(
        request.headers(),
        request.uri(),
        state.config().trust_forwarded_host,
    );

    let store = state.resolver().resolve_current(hostname.as_deref()).await;

    if let Some(store) = &store {
        Span::current().record("store_id", store.id.as_str());
        sentry::configure_scope(|scope| {
            scope.set_tag("store_id", store.id.as_str());
        });
    }

    request.extensions_mut().insert(ResolvedStore(store));
    next.run(request).await
}

/// Extractor that requires a resolved store.
///
/// Rejects with `404 Store not found` when the hostname maps to no store.
pub struct CurrentStore(pub Store);

impl<S> FromRequestParts<S> for CurrentStore
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ResolvedStore>()
            .and_then(|resolved| resolved.0.clone())
            .map(Self)
            .ok_or(AppError::StoreNotFound)
    }
}

/// Extractor that optionally gets the resolved store.
///
/// Unlike `CurrentStore`, this does not reject the request when no store matched.
pub struct OptionalStore(pub Option<Store>);

impl<S> FromRequestParts<S> for OptionalStore
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let store = parts
            .extensions
            .get::<ResolvedStore>()
            .and_then(|resolved| resolved.0.clone());
        Ok(Self(store))
    }
}
