//! Offline hostname resolution.
//!
//! Runs the storefront's resolver against the real directory and reports the
//! outcome with the error kind preserved, which the server deliberately hides.

use std::time::Duration;

use epaket_storefront::db::PgDomainDirectory;
use epaket_storefront::services::StoreResolver;

use super::{CommandError, connect};

/// Resolve `hostname` and print the store as JSON.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the lookup fails.
pub async fn hostname(hostname: &str, timeout_ms: u64) -> Result<(), CommandError> {
    let pool = connect().await?;
    let resolver = StoreResolver::new(
        PgDomainDirectory::new(pool),
        Duration::from_millis(timeout_ms.max(1)),
    );

    let outcome = resolver.lookup(hostname).await?;

    #[allow(clippy::print_stdout)]
    {
        match outcome {
            Some(store) => {
                let json = serde_json::to_string_pretty(&store)
                    .unwrap_or_else(|_| store.id.to_string());
                println!("{json}");
            }
            None => println!("No store registered for {hostname}"),
        }
    }
    Ok(())
}
