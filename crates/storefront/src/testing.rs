//! In-memory domain directory for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use epaket_core::{CandidateSet, DirectoryError, DomainDirectory};
use serde_json::Value;

/// Directory over a fixed list of raw records, counting queries.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    records: Arc<Vec<Value>>,
    fail: bool,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MemoryDirectory {
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(records),
            ..Self::default()
        }
    }

    /// A directory whose every query errors.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of queries issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainDirectory for MemoryDirectory {
    async fn find_by_domain(
        &self,
        candidates: &CandidateSet,
    ) -> Result<Option<Value>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(DirectoryError::backend("simulated backend fault"));
        }

        Ok(self
            .records
            .iter()
            .find(|record| {
                record
                    .get("domain")
                    .and_then(Value::as_str)
                    .is_some_and(|domain| candidates.contains(domain))
            })
            .cloned())
    }
}
