//! Identity claims carried by the `auth-token` cookie.

use serde::{Deserialize, Serialize};

/// Verified identity inserted into request extensions by the
/// authentication middleware.
///
/// Only ever constructed from a token whose signature and expiry were
/// checked; handlers may trust it for the rest of the request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Subject identifier (the user's document id)
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl IdentityClaims {
    pub fn has_role(&self, role: crate::auth::roles::Role) -> bool {
        self.role == role.as_str()
    }
}
