//! CLI subcommands.

pub mod domain;
pub mod migrate;
pub mod resolve;
pub mod seed;

use epaket_storefront::config::{self, ConfigError};
use epaket_storefront::db::{self, RepositoryError};
use epaket_storefront::services::ResolveError;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Store lookup failed.
    #[error("Lookup failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid YAML of the expected shape.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Input failed validation.
    #[error("{0} validation errors found")]
    Validation(usize),
}

/// Connect to the storefront database named by `STOREFRONT_DATABASE_URL`.
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = config::get_database_url("STOREFRONT_DATABASE_URL")?;

    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&database_url).await?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_resolve_error_keeps_its_kind() {
        let err = CommandError::from(ResolveError::Timeout(Duration::from_millis(250)));

        assert!(matches!(
            err,
            CommandError::Resolve(ResolveError::Timeout(elapsed))
                if elapsed == Duration::from_millis(250)
        ));
        assert!(err.to_string().starts_with("Lookup failed: "));
    }
}
