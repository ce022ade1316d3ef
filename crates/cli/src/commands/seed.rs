//! Seed the domain directory from a YAML file.
//!
//! ```yaml
//! - store_name: Diamond Luxe
//!   domains:
//!     - diamond.example
//!     - diamond-luxe.epaket.app
//! - store_name: Minimalist
//!   domains: [minimalist.example]
//! ```
//!
//! The file is validated before connecting to the database. Each entry becomes
//! one store, and all of its domains resolve to that store's ID.

use std::collections::HashSet;
use std::path::Path;

use epaket_core::normalize_host;
use epaket_storefront::db::{NewStore, StoreRepository};
use serde::Deserialize;
use tracing::{error, info};

use super::{CommandError, connect};

/// One store and the domains it answers on.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedStore {
    pub store_name: String,
    pub domains: Vec<String>,
}

/// Validate seed entries, returning one message per problem.
#[must_use]
pub fn validate(stores: &[SeedStore]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, store) in stores.iter().enumerate() {
        if store.store_name.trim().is_empty() {
            errors.push(format!("entry {i}: store_name is empty"));
        }
        if store.domains.is_empty() {
            errors.push(format!("entry {i}: no domains listed"));
        }
        for domain in &store.domains {
            let normalized = normalize_host(domain);
            if normalized.is_empty() {
                errors.push(format!("entry {i}: empty domain"));
            } else if !seen.insert(normalized.clone()) {
                errors.push(format!("entry {i}: duplicate domain {normalized}"));
            }
        }
    }

    errors
}

/// Seed store domains from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file
/// * `clear_existing` - If true, remove every registered store first
///
/// The clear and all inserts run in one transaction, so a failure leaves the
/// directory as it was.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, fails validation,
/// or database operations fail.
pub async fn domains(file_path: &str, clear_existing: bool) -> Result<(), CommandError> {
    let path = Path::new(file_path);

    info!(path = %file_path, "Loading store domains from file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: file_path.to_owned(),
            source,
        })?;
    let stores: Vec<SeedStore> = serde_yaml::from_str(&content)?;

    info!(stores = stores.len(), "Parsed seed file");

    let errors = validate(&stores);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CommandError::Validation(errors.len()));
    }

    let new_stores: Vec<NewStore> = stores
        .into_iter()
        .map(|store| NewStore {
            store_name: store.store_name,
            domains: store.domains,
        })
        .collect();

    let pool = connect().await?;
    let report = StoreRepository::new(&pool)
        .seed(&new_stores, clear_existing)
        .await?;

    if clear_existing {
        info!(removed = report.cleared, "Cleared existing stores");
    }
    info!(
        stores = report.stores,
        domains = report.domains,
        "Seeding complete"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Vec<SeedStore> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_seed_file() {
        let stores = parse(
            "
- store_name: Diamond Luxe
  domains: [diamond.example, diamond-luxe.epaket.app]
- store_name: Minimalist
  domains: [minimalist.example]
",
        );
        assert_eq!(stores.len(), 2);
        assert!(validate(&stores).is_empty());
    }

    #[test]
    fn test_www_variant_counts_as_duplicate() {
        let stores = parse(
            "
- store_name: Elegant
  domains: [elegant.example, WWW.elegant.example]
",
        );
        let errors = validate(&stores);
        assert_eq!(errors, vec!["entry 0: duplicate domain elegant.example"]);
    }

    #[test]
    fn test_empty_fields_rejected() {
        let stores = parse(
            "
- store_name: '  '
  domains: []
- store_name: Blank Domain
  domains: ['www.']
",
        );
        let errors = validate(&stores);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_missing_domains_key_is_parse_error() {
        let parsed: Result<Vec<SeedStore>, _> = serde_yaml::from_str("- store_name: Acme\n");
        assert!(parsed.is_err());
    }
}
