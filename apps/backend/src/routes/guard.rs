//! Per-route guard chains.
//!
//! A `GuardChain` is declared next to each route and applied once at
//! registration. Verification always runs before the role check, and the
//! role check before the handler.

use actix_web::Route;

use crate::auth::roles::RoleSet;
use crate::middleware::jwt_extract::JwtExtract;
use crate::middleware::require_role::RequireRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardChain {
    /// Verify if a token is present; never reject.
    Optional,
    /// Verify; any role may proceed.
    Authenticated,
    /// Verify, then require a role from the set.
    Required(RoleSet),
}

pub const ADMIN_ONLY: GuardChain = GuardChain::required(RoleSet::ADMIN);
pub const USER_OR_ADMIN: GuardChain = GuardChain::required(RoleSet::USER_OR_ADMIN);
pub const USER_ONLY: GuardChain = GuardChain::required(RoleSet::USER);

impl GuardChain {
    pub const fn required(allow: RoleSet) -> Self {
        GuardChain::Required(allow)
    }

    pub const fn authenticated() -> Self {
        GuardChain::Authenticated
    }

    pub const fn optional() -> Self {
        GuardChain::Optional
    }

    /// Wrap `route` with this chain. The last `wrap` runs first, so the role
    /// guard is added before verification.
    pub fn apply(self, route: Route) -> Route {
        match self {
            GuardChain::Optional => route.wrap(JwtExtract::optional()),
            GuardChain::Authenticated => route.wrap(JwtExtract::required()),
            GuardChain::Required(allow) => route
                .wrap(RequireRole::new(allow))
                .wrap(JwtExtract::required()),
        }
    }
}
