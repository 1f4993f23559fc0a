#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;

// Re-exports for public API
pub use adapters::{MemoryStore, MongoStore};
pub use auth::claims::IdentityClaims;
pub use auth::jwt::{mint_access_token, verify_access_token, TokenSubject};
pub use auth::roles::{Role, RoleSet};
pub use config::app::Config;
pub use error::AppError;
pub use extractors::identity::{Identity, MaybeIdentity};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_extract::JwtExtract;
pub use middleware::request_trace::RequestTrace;
pub use middleware::require_role::RequireRole;
pub use middleware::structured_logger::StructuredLogger;
pub use repos::Store;
pub use routes::guard::GuardChain;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    catalog_test_support::logging::init();
}
