//! Integration tests for E-Paket.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! task db:start
//! cargo run -p epaket-cli -- migrate
//!
//! # Run integration tests (they are ignored by default)
//! cargo test -p epaket-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `store_directory` - `PostgreSQL` domain directory and resolver
//! - `storefront_http` - Running storefront server

use epaket_storefront::config;
use epaket_storefront::db;
use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test storefront database.
///
/// # Panics
///
/// Panics if `STOREFRONT_DATABASE_URL` is unset or the database is unreachable.
pub async fn storefront_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = config::get_database_url("STOREFRONT_DATABASE_URL")
        .expect("STOREFRONT_DATABASE_URL must be set for integration tests");
    db::create_pool(&url)
        .await
        .expect("Failed to connect to storefront database")
}

/// A domain unique to one test run, so tests never collide.
#[must_use]
pub fn unique_domain(prefix: &str) -> String {
    format!("{prefix}-{}.test.epaket.app", Uuid::new_v4().simple())
}

/// Base URL of a running storefront server.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
