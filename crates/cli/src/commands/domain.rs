//! Domain directory management commands.
//!
//! # Usage
//!
//! ```bash
//! ep-cli domain add --store-name "Diamond Luxe" diamond.example
//! ep-cli domain add --store-id 1 diamond-luxe.epaket.app
//! ep-cli domain list
//! ep-cli domain remove diamond.example
//! ```

use epaket_core::StoreId;
use epaket_storefront::db::StoreRepository;

use super::{CommandError, connect};

/// Create a store answering on `domain`.
///
/// # Errors
///
/// Returns an error if the domain is already registered or the database fails.
pub async fn add(store_name: &str, domain: &str) -> Result<(), CommandError> {
    let pool = connect().await?;

    let store = StoreRepository::new(&pool).create(store_name, domain).await?;

    tracing::info!(
        store_id = %store.id,
        domain = %store.domain,
        "Registered domain for {}",
        store.name
    );
    Ok(())
}

/// Register another domain for an existing store.
///
/// # Errors
///
/// Returns an error if the store does not exist, the domain is already
/// registered, or the database fails.
pub async fn attach(store_id: &str, domain: &str) -> Result<(), CommandError> {
    let pool = connect().await?;

    let store = StoreRepository::new(&pool)
        .add_domain(&StoreId::from(store_id), domain)
        .await?;

    tracing::info!(
        store_id = %store.id,
        domain = %store.domain,
        "Added domain to {}",
        store.name
    );
    Ok(())
}

/// Remove a registered domain.
///
/// The store goes with its last domain.
///
/// # Errors
///
/// Returns an error if the domain is not registered or the database fails.
pub async fn remove(domain: &str) -> Result<(), CommandError> {
    let pool = connect().await?;

    StoreRepository::new(&pool).delete_by_domain(domain).await?;

    tracing::info!(domain, "Removed domain");
    Ok(())
}

/// Print every registered domain.
///
/// # Errors
///
/// Returns an error if the database fails or holds malformed rows.
pub async fn list() -> Result<(), CommandError> {
    let pool = connect().await?;

    let stores = StoreRepository::new(&pool).list().await?;

    #[allow(clippy::print_stdout)]
    {
        if stores.is_empty() {
            println!("No domains registered");
        }
        for store in &stores {
            println!("{}\t{}\t{}", store.domain, store.id, store.name);
        }
    }
    Ok(())
}
