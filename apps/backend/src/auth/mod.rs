pub mod claims;
pub mod cookie;
pub mod jwt;
pub mod roles;

pub use claims::IdentityClaims;
pub use cookie::{auth_cookie, removal_cookie, AUTH_COOKIE_NAME};
pub use jwt::{mint_access_token, verify_access_token, TokenSubject};
pub use roles::{Role, RoleSet};
