use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::error::AppError;
use crate::repos::Store;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Document store (absent in auth-only test scenarios)
    store: Option<Arc<dyn Store>>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
}

impl AppState {
    /// Create a new AppState with the given store and security config
    pub fn new(store: Arc<dyn Store>, security: SecurityConfig) -> Self {
        Self {
            store: Some(store),
            security,
        }
    }

    /// Create a new AppState without a store
    pub fn new_without_store(security: SecurityConfig) -> Self {
        Self {
            store: None,
            security,
        }
    }

    pub fn store(&self) -> Option<&Arc<dyn Store>> {
        self.store.as_ref()
    }

    /// Canonical accessor for handlers: the store, or `DbUnavailable`.
    pub fn require_store(&self) -> Result<&dyn Store, AppError> {
        self.store
            .as_deref()
            .ok_or_else(AppError::db_unavailable)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.as_ref().map(|s| s.backend_name()))
            .field("security", &self.security)
            .finish()
    }
}
