use std::sync::Arc;

use crate::adapters::mongo::MongoStore;
use crate::config::app::Config;
use crate::error::AppError;
use crate::repos::Store;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum StoreSource {
    None,
    Ready(Arc<dyn Store>),
    Mongo { uri: String, db_name: String },
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    store: StoreSource,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::without_secret(),
            store: StoreSource::None,
        }
    }

    /// Use an already constructed store.
    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = StoreSource::Ready(store);
        self
    }

    /// Connect to MongoDB at build time.
    pub fn with_mongo(mut self, uri: impl Into<String>, db_name: impl Into<String>) -> Self {
        self.store = StoreSource::Mongo {
            uri: uri.into(),
            db_name: db_name.into(),
        };
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Security and store settings straight from process configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let security = SecurityConfig::from_optional_secret(config.jwt_secret.clone())
            .with_secure_cookies(config.runtime_env.is_production());
        let uri = config.require_db_uri()?;
        Ok(Self::new()
            .with_security(security)
            .with_mongo(uri, config.db_name.clone()))
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store: Option<Arc<dyn Store>> = match self.store {
            StoreSource::None => None,
            StoreSource::Ready(store) => Some(store),
            StoreSource::Mongo { uri, db_name } => {
                let store = MongoStore::connect(&uri, &db_name)
                    .await
                    .map_err(AppError::storage("Failed to connect to database"))?;
                let store: Arc<dyn Store> = Arc::new(store);
                Some(store)
            }
        };

        Ok(match store {
            Some(store) => AppState::new(store, self.security_config),
            None => AppState::new_without_store(self.security_config),
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
