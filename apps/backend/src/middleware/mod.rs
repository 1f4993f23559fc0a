pub mod cors;
pub mod jwt_extract;
pub mod request_trace;
pub mod require_role;
pub mod structured_logger;

pub use cors::cors_middleware;
pub use jwt_extract::{AuthMode, JwtExtract};
pub use request_trace::{RequestId, RequestTrace};
pub use require_role::RequireRole;
pub use structured_logger::StructuredLogger;
