//! Hostname normalization and lookup candidates.
//!
//! Hostnames that differ only by case, surrounding whitespace, or a leading
//! `www.` resolve to the same tenant. The single environment-specific rule is
//! that `localhost` and `127.0.0.1` are interchangeable for local development.

use core::fmt;
use std::collections::BTreeSet;

const WWW_PREFIX: &str = "www.";
const LOCALHOST: &str = "localhost";
const LOOPBACK_V4: &str = "127.0.0.1";

/// Normalize a raw hostname for directory lookup.
///
/// Trims surrounding whitespace, lower-cases, and strips one leading `www.`.
/// Ports and subdomains are left untouched.
///
/// ```
/// use epaket_core::normalize_host;
///
/// assert_eq!(normalize_host("www.Example.com"), "example.com");
/// assert_eq!(normalize_host("  SHOP.example.com "), "shop.example.com");
/// ```
#[must_use]
pub fn normalize_host(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    match lowered.strip_prefix(WWW_PREFIX) {
        Some(rest) => rest.to_owned(),
        None => lowered,
    }
}

/// The set of hostnames treated as equivalent when querying the directory.
///
/// Iteration is sorted so diagnostics are stable; lookups only care about
/// membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    normalized: String,
    hosts: BTreeSet<String>,
}

impl CandidateSet {
    /// Build the candidate set for a raw hostname.
    #[must_use]
    pub fn for_host(raw: &str) -> Self {
        let normalized = normalize_host(raw);
        let mut hosts = BTreeSet::new();
        hosts.insert(normalized.clone());

        match normalized.as_str() {
            LOCALHOST => {
                hosts.insert(LOOPBACK_V4.to_owned());
            }
            LOOPBACK_V4 => {
                hosts.insert(LOCALHOST.to_owned());
            }
            _ => {}
        }

        Self { normalized, hosts }
    }

    /// The normalized host the set was seeded with.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Returns true if `host` is one of the candidates.
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Always false; a candidate set holds at least the normalized host.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Iterate over the candidates in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    /// Collect the candidates into an owned vector (e.g. for a SQL `ANY($1)` bind).
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.hosts.iter().cloned().collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, host) in self.hosts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(host)?;
        }
        f.write_str("]")
    }
}
