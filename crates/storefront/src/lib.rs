//! E-Paket Storefront library.
//!
//! This crate provides the tenant-aware storefront as a library,
//! allowing it to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
mod testing;

use axum::{
    Router,
    extract::Request,
    middleware::{from_fn, from_fn_with_state},
};
use epaket_core::DomainDirectory;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Requests that match a route pass through store resolution before reaching
/// the handler. The not-found fallback never queries the directory.
pub fn app<D: DomainDirectory + 'static>(state: AppState<D>) -> Router {
    routes::routes::<D>()
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::store_context_middleware::<D>,
        ))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                    store_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use epaket_core::Store;
    use secrecy::SecretString;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::middleware::request_id::REQUEST_ID_HEADER;
    use crate::testing::MemoryDirectory;

    fn config(trust_forwarded_host: bool) -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            trust_forwarded_host,
            directory_timeout: Duration::from_secs(1),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    fn directory() -> MemoryDirectory {
        MemoryDirectory::with_records(vec![
            json!({
                "id": 10,
                "store_name": "Diamond Luxe",
                "domain": "diamond.example",
                "created_at": "2026-03-01T12:00:00+00:00",
            }),
            json!({ "id": 11, "name": "Local Dev", "domain": "localhost" }),
        ])
    }

    fn router(directory: MemoryDirectory, trust_forwarded_host: bool) -> Router {
        app(AppState::new(config(trust_forwarded_host), directory))
    }

    fn get(uri: &str, host: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header("host", host);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_api_store_returns_resolved_store() {
        let response = router(directory(), false)
            .oneshot(get("/api/store", Some("www.Diamond.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let store: Store = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(store.id.as_str(), "10");
        assert_eq!(store.name, "Diamond Luxe");
        assert_eq!(store.domain, "diamond.example");
        assert_eq!(store.created_at, "2026-03-01T12:00:00+00:00");
    }

    #[tokio::test]
    async fn test_api_store_unknown_host_is_not_found() {
        let response = router(directory(), false)
            .oneshot(get("/api/store", Some("unknown.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Store not found");
    }

    #[tokio::test]
    async fn test_home_for_loopback_uses_localhost_store() {
        let response = router(directory(), false)
            .oneshot(get("/", Some("127.0.0.1:3000")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Welcome to Local Dev");
    }

    #[tokio::test]
    async fn test_home_when_directory_fails_is_neutral_not_found() {
        let response = router(MemoryDirectory::failing(), false)
            .oneshot(get("/", Some("diamond.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.starts_with("Store not found"));
    }

    #[tokio::test]
    async fn test_request_without_host_skips_directory() {
        let directory = directory();
        let response = router(directory.clone(), false)
            .oneshot(get("/api/store", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(directory.calls(), 0);
    }

    #[tokio::test]
    async fn test_forwarded_host_used_when_trusted() {
        let request = Request::builder()
            .uri("/api/store")
            .header("host", "edge.internal")
            .header("x-forwarded-host", "diamond.example")
            .body(Body::empty())
            .unwrap();

        let response = router(directory(), true).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let request = Request::builder()
            .uri("/api/store")
            .header("host", "diamond.example")
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::empty())
            .unwrap();

        let response = router(directory(), false).oneshot(request).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let directory = directory();
        let response = router(directory.clone(), false)
            .oneshot(get("/nope", Some("diamond.example")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(directory.calls(), 0);
    }

    #[tokio::test]
    async fn test_nested_api_route_resolves_store() {
        let directory = directory();
        let response = router(directory.clone(), false)
            .oneshot(get("/api/store", Some("diamond.example")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(directory.calls(), 1);
    }
}
