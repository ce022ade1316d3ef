//! Tenant store resolution from a request hostname.
//!
//! Resolution never fails from the caller's point of view: every error is
//! logged here and collapsed to "no store", which the HTTP layer renders as a
//! neutral not-found state.

use std::time::Duration;

use epaket_core::{CandidateSet, DirectoryError, DomainDirectory, RecordError, Store, StoreRecord};
use tracing::{debug, error, warn};

/// Why a lookup produced no store, for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The directory reported an error.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The directory did not answer in time.
    #[error("directory query timed out after {0:?}")]
    Timeout(Duration),

    /// The directory returned a record of an unexpected shape.
    #[error("directory record schema mismatch: {0}")]
    SchemaMismatch(#[from] RecordError),
}

/// Maps hostnames to tenant stores through a [`DomainDirectory`].
///
/// Holds no mutable state; concurrent resolutions need no coordination.
#[derive(Debug, Clone)]
pub struct StoreResolver<D> {
    directory: D,
    query_timeout: Duration,
}

impl<D: DomainDirectory> StoreResolver<D> {
    /// Create a resolver over `directory`, bounding each query by `query_timeout`.
    #[must_use]
    pub const fn new(directory: D, query_timeout: Duration) -> Self {
        Self {
            directory,
            query_timeout,
        }
    }

    /// The directory this resolver queries.
    #[must_use]
    pub const fn directory(&self) -> &D {
        &self.directory
    }

    /// Look up the store for `hostname`, keeping error kinds distinct.
    ///
    /// Issues exactly one directory query.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if the query fails, times out, or returns a
    /// malformed record. No match is `Ok(None)`.
    pub async fn lookup(&self, hostname: &str) -> Result<Option<Store>, ResolveError> {
        let candidates = CandidateSet::for_host(hostname);
        debug!(hostname, %candidates, "Resolving store");

        let row = tokio::time::timeout(
            self.query_timeout,
            self.directory.find_by_domain(&candidates),
        )
        .await
        .map_err(|_| ResolveError::Timeout(self.query_timeout))??;

        debug!(hostname, raw = ?row, "Domain directory result");

        let Some(row) = row else {
            warn!(hostname, %candidates, "No store registered for hostname");
            return Ok(None);
        };

        let store = StoreRecord::from_json(row)?.into_store();
        Ok(Some(store))
    }

    /// Resolve the store for `hostname`, or `None` on no match or any failure.
    pub async fn resolve(&self, hostname: &str) -> Option<Store> {
        match self.lookup(hostname).await {
            Ok(Some(store)) => {
                debug!(hostname, store_id = %store.id, domain = %store.domain, "Store resolved");
                Some(store)
            }
            Ok(None) => None,
            Err(ResolveError::SchemaMismatch(e)) => {
                error!(hostname, error = %e, "Domain directory returned an unexpected record shape");
                None
            }
            Err(e) => {
                error!(hostname, error = %e, "Store lookup failed");
                None
            }
        }
    }

    /// Resolve the store for the ambient hostname of the current request.
    ///
    /// `None` means no hostname is available in this context; the directory is
    /// not queried at all.
    pub async fn resolve_current(&self, ambient_hostname: Option<&str>) -> Option<Store> {
        let Some(hostname) = ambient_hostname else {
            debug!("No ambient hostname, skipping store resolution");
            return None;
        };
        self.resolve(hostname).await
    }
}
