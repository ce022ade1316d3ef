//! Application state shared across handlers.

use std::sync::Arc;

use epaket_core::DomainDirectory;

use crate::config::StorefrontConfig;
use crate::services::StoreResolver;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the store resolver.
pub struct AppState<D> {
    inner: Arc<AppStateInner<D>>,
}

struct AppStateInner<D> {
    config: StorefrontConfig,
    resolver: StoreResolver<D>,
}

impl<D> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: DomainDirectory> AppState<D> {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `directory` - Domain directory used to resolve tenant stores
    #[must_use]
    pub fn new(config: StorefrontConfig, directory: D) -> Self {
        let resolver = StoreResolver::new(directory, config.directory_timeout);

        Self {
            inner: Arc::new(AppStateInner { config, resolver }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the store resolver.
    #[must_use]
    pub fn resolver(&self) -> &StoreResolver<D> {
        &self.inner.resolver
    }
}
