//! Domain directory contract.
//!
//! A domain directory maps domain strings to store records. It is owned by an
//! external backend; the storefront only ever issues single read queries.

use serde_json::Value;

use crate::types::CandidateSet;

/// Errors reported by a directory backend.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    /// The backend failed to answer the query.
    #[error("directory backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wrap any backend error.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Read-only lookup of store records by domain.
///
/// Implementations return at most one raw record whose domain is a member of
/// `candidates`, without disambiguating among multiple matches. The record is
/// returned unvalidated; callers parse it with
/// [`StoreRecord::from_json`](crate::StoreRecord::from_json).
pub trait DomainDirectory: Send + Sync {
    /// Find one record whose domain is in `candidates`.
    fn find_by_domain(
        &self,
        candidates: &CandidateSet,
    ) -> impl Future<Output = Result<Option<Value>, DirectoryError>> + Send;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::StoreRecord;

    struct SingleRow(Value);

    impl DomainDirectory for SingleRow {
        async fn find_by_domain(
            &self,
            candidates: &CandidateSet,
        ) -> Result<Option<Value>, DirectoryError> {
            let domain = self.0["domain"].as_str().unwrap_or_default();
            Ok(candidates.contains(domain).then(|| self.0.clone()))
        }
    }

    #[tokio::test]
    async fn test_directory_row_parses_into_store() {
        let directory = SingleRow(json!({ "id": 9, "name": "Nine", "domain": "127.0.0.1" }));

        let row = directory
            .find_by_domain(&CandidateSet::for_host("localhost"))
            .await
            .unwrap()
            .unwrap();
        let store = StoreRecord::from_json(row).unwrap().into_store();

        assert_eq!(store.domain, "127.0.0.1");
        assert_eq!(store.name, "Nine");
    }

    #[test]
    fn test_backend_error_display() {
        let err = DirectoryError::backend("connection refused");
        assert_eq!(err.to_string(), "directory backend error: connection refused");
    }
}
