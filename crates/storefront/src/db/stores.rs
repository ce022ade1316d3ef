//! Store repository for domain directory management.
//!
//! The resolver never writes; these operations back the CLI. A store owns one
//! or more rows in `storefront.store_domain`, so every domain of a store
//! resolves to the same `Store.id`.

use epaket_core::{Store, StoreId, StoreRecord, normalize_host};
use serde_json::Value;
use sqlx::{PgConnection, PgPool};

use super::RepositoryError;

const FIND_BY_EXACT_DOMAIN: &str = r"
    SELECT to_jsonb(s) || jsonb_build_object('domain', d.domain) AS record
    FROM storefront.store_domain d
    JOIN storefront.store s ON s.id = d.store_id
    WHERE d.domain = $1
";

/// A store to create together with the domains it answers on.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub store_name: String,
    pub domains: Vec<String>,
}

/// Outcome of [`StoreRepository::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Stores removed before seeding.
    pub cleared: u64,
    /// Stores created.
    pub stores: usize,
    /// Domains registered across the created stores.
    pub domains: usize,
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a store answering on a single domain.
    ///
    /// The domain is stored normalized so it matches resolver lookups.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidInput` if the domain normalizes to nothing.
    /// Returns `RepositoryError::Conflict` if the domain is already registered.
    /// Returns `RepositoryError::DataCorruption` if the inserted row fails validation.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, store_name: &str, domain: &str) -> Result<Store, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let store_id = insert_store(&mut tx, store_name).await?;
        let store = insert_domain(&mut tx, store_id, domain).await?;

        tx.commit().await?;
        Ok(store)
    }

    /// Register an additional domain for an existing store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidInput` if the ID is not a directory ID
    /// or the domain normalizes to nothing.
    /// Returns `RepositoryError::NotFound` if no store has this ID.
    /// Returns `RepositoryError::Conflict` if the domain is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_domain(
        &self,
        store_id: &StoreId,
        domain: &str,
    ) -> Result<Store, RepositoryError> {
        let id: i64 = store_id
            .as_str()
            .parse()
            .map_err(|_| RepositoryError::InvalidInput(format!("invalid store id {store_id}")))?;

        let mut conn = self.pool.acquire().await?;
        insert_domain(&mut conn, id, domain).await
    }

    /// Create every store in `stores` in a single transaction.
    ///
    /// With `clear_existing`, every store is removed first inside the same
    /// transaction. Any failure rolls the whole seed back.
    ///
    /// # Errors
    ///
    /// Returns the first `RepositoryError` hit; nothing is written in that case.
    pub async fn seed(
        &self,
        stores: &[NewStore],
        clear_existing: bool,
    ) -> Result<SeedReport, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut report = SeedReport::default();

        if clear_existing {
            report.cleared = delete_all(&mut tx).await?;
        }

        for store in stores {
            let store_id = insert_store(&mut tx, &store.store_name).await?;
            for domain in &store.domains {
                insert_domain(&mut tx, store_id, domain).await?;
                report.domains += 1;
            }
            report.stores += 1;
        }

        tx.commit().await?;
        Ok(report)
    }

    /// List every registered store domain, ordered by domain.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row fails validation.
    pub async fn list(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            r"
            SELECT to_jsonb(s) || jsonb_build_object('domain', d.domain) AS record
            FROM storefront.store_domain d
            JOIN storefront.store s ON s.id = d.store_id
            ORDER BY d.domain
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(|(record,)| to_store(record)).collect()
    }

    /// Remove a domain from the directory.
    ///
    /// A store left without domains is removed with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the domain is not registered.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_domain(&self, domain: &str) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let store_id: Option<(i64,)> = sqlx::query_as(
            "DELETE FROM storefront.store_domain WHERE domain = $1 RETURNING store_id",
        )
        .bind(normalize_host(domain))
        .fetch_optional(&mut *tx)
        .await?;

        let Some((store_id,)) = store_id else {
            return Err(RepositoryError::NotFound);
        };

        sqlx::query(
            r"
            DELETE FROM storefront.store s
            WHERE s.id = $1
              AND NOT EXISTS (SELECT 1 FROM storefront.store_domain d WHERE d.store_id = s.id)
            ",
        )
        .bind(store_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Remove every store and its domains. Returns the number of stores deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        delete_all(&mut conn).await
    }
}

async fn insert_store(conn: &mut PgConnection, store_name: &str) -> Result<i64, RepositoryError> {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO storefront.store (store_name) VALUES ($1) RETURNING id")
            .bind(store_name)
            .fetch_one(&mut *conn)
            .await?;
    Ok(id)
}

async fn insert_domain(
    conn: &mut PgConnection,
    store_id: i64,
    domain: &str,
) -> Result<Store, RepositoryError> {
    let domain = normalize_host(domain);
    if domain.is_empty() {
        return Err(RepositoryError::InvalidInput(
            "domain cannot be empty".to_owned(),
        ));
    }

    sqlx::query("INSERT INTO storefront.store_domain (domain, store_id) VALUES ($1, $2)")
        .bind(&domain)
        .bind(store_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict(format!("domain {domain} already registered"));
                }
                if db_err.is_foreign_key_violation() {
                    return RepositoryError::NotFound;
                }
            }
            RepositoryError::Database(e)
        })?;

    let (record,): (Value,) = sqlx::query_as(FIND_BY_EXACT_DOMAIN)
        .bind(&domain)
        .fetch_one(&mut *conn)
        .await?;

    to_store(record)
}

async fn delete_all(conn: &mut PgConnection) -> Result<u64, RepositoryError> {
    let result = sqlx::query("DELETE FROM storefront.store")
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

fn to_store(record: Value) -> Result<Store, RepositoryError> {
    StoreRecord::from_json(record)
        .map(StoreRecord::into_store)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid store row: {e}")))
}
