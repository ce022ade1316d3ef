//! `PostgreSQL`-backed domain directory.

use epaket_core::{CandidateSet, DirectoryError, DomainDirectory};
use serde_json::Value;
use sqlx::PgPool;

/// Rows come back as `jsonb` so the record shape is validated by
/// `StoreRecord::from_json` rather than by a fixed column list.
const FIND_BY_DOMAIN: &str = r"
    SELECT to_jsonb(s) || jsonb_build_object('domain', d.domain) AS record
    FROM storefront.store_domain d
    JOIN storefront.store s ON s.id = d.store_id
    WHERE d.domain = ANY($1)
    LIMIT 1
";

/// Domain directory reading `storefront.store_domain` joined to `storefront.store`.
#[derive(Debug, Clone)]
pub struct PgDomainDirectory {
    pool: PgPool,
}

impl PgDomainDirectory {
    /// Create a directory over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check that the database answers.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the database is unreachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

impl DomainDirectory for PgDomainDirectory {
    async fn find_by_domain(
        &self,
        candidates: &CandidateSet,
    ) -> Result<Option<Value>, DirectoryError> {
        let row: Option<(Value,)> = sqlx::query_as(FIND_BY_DOMAIN)
            .bind(candidates.to_vec())
            .fetch_optional(&self.pool)
            .await
            .map_err(DirectoryError::backend)?;

        Ok(row.map(|(record,)| record))
    }
}
