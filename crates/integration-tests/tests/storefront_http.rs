//! Integration tests against a running storefront server.
//!
//! These tests require:
//! - A running `PostgreSQL` database (task db:start)
//! - The storefront server running (cargo run -p epaket-storefront)
//!
//! Run with: cargo test -p epaket-integration-tests -- --ignored

use epaket_integration_tests::{storefront_base_url, unique_domain};
use reqwest::{Client, StatusCode, header};

fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_readiness() {
    let resp = client()
        .get(format!("{}/health/ready", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_host_gets_store_not_found() {
    let resp = client()
        .get(format!("{}/api/store", storefront_base_url()))
        .header(header::HOST, unique_domain("nobody"))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-request-id"));
}
