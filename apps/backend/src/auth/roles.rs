//! Roles and the allow-sets that gate endpoints.
//!
//! Allow-sets are plain data: a `RoleSet` wraps a `'static` slice of roles and
//! is bound once when a route is declared. Admin-only, user-or-admin and
//! user-only guards are the same check over different constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of roles a user record or token may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Moderator,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Roles permitted to invoke an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    pub const ADMIN: RoleSet = RoleSet(&[Role::Admin]);
    pub const USER_OR_ADMIN: RoleSet = RoleSet(&[Role::User, Role::Admin]);
    pub const USER: RoleSet = RoleSet(&[Role::User]);

    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn roles(&self) -> &'static [Role] {
        self.0
    }

    /// Membership test against the raw role string carried by a token.
    ///
    /// Comparison is exact: `"Admin"` is not `"admin"`.
    pub fn permits(&self, role: &str) -> bool {
        self.0.iter().any(|allowed| allowed.as_str() == role)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        write!(f, "[{}]", names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn named_sets_match_their_members() {
        assert!(RoleSet::ADMIN.permits("admin"));
        assert!(!RoleSet::ADMIN.permits("user"));
        assert!(!RoleSet::ADMIN.permits("moderator"));

        assert!(RoleSet::USER_OR_ADMIN.permits("admin"));
        assert!(RoleSet::USER_OR_ADMIN.permits("user"));
        assert!(!RoleSet::USER_OR_ADMIN.permits("moderator"));

        assert!(RoleSet::USER.permits("user"));
        assert!(!RoleSet::USER.permits("admin"));
    }

    #[test]
    fn permits_is_case_sensitive() {
        assert!(!RoleSet::ADMIN.permits("Admin"));
        assert!(!RoleSet::ADMIN.permits(" admin"));
        assert!(!RoleSet::ADMIN.permits(""));
    }

    #[test]
    fn role_parses_and_displays() {
        for role in [Role::Admin, Role::User, Role::Moderator] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
            assert_eq!(role.to_string(), role.as_str());
        }
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(UnknownRole("superuser".to_string()))
        );
    }

    #[test]
    fn role_set_display_lists_members() {
        assert_eq!(RoleSet::USER_OR_ADMIN.to_string(), "[user,admin]");
    }

    proptest! {
        #[test]
        fn strings_outside_the_set_are_never_permitted(role in "[A-Za-z_]{0,12}") {
            let expected = role == "admin";
            prop_assert_eq!(RoleSet::ADMIN.permits(&role), expected);
        }
    }
}
