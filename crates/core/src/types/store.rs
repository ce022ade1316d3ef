//! Resolved tenant store.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Display name used when a directory record carries no name at all.
pub const UNNAMED_STORE: &str = "Unnamed Store";

/// Opaque store identifier.
///
/// The domain directory may key stores numerically; the ID is always carried
/// in string form so callers never depend on the backend's key type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Create a store ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for StoreId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for StoreId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for StoreId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A tenant storefront resolved from the domain directory.
///
/// Built fresh on every resolution; nothing in this crate caches or persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Tenant identifier.
    pub id: StoreId,
    /// Display name of the store.
    pub name: String,
    /// The directory domain that matched the lookup.
    pub domain: String,
    /// Creation timestamp as reported by the directory (not parsed).
    pub created_at: String,
}
