//! User repository contract and domain model.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;

use crate::errors::domain::DomainError;

/// User domain model
///
/// `role` and `status` are kept as stored; values written through the API
/// are validated against [`crate::auth::roles::Role`] and [`UserStatus`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

/// Account status values accepted on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl UserStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
            UserStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            "pending" => Ok(UserStatus::Pending),
            _ => Err(()),
        }
    }
}

/// Partial update; `None` fields are left untouched. `updated_at` is
/// always written.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub updated_at: OffsetDateTime,
}

impl UserUpdate {
    pub fn at(updated_at: OffsetDateTime) -> Self {
        Self {
            name: None,
            email: None,
            role: None,
            status: None,
            updated_at,
        }
    }

    /// Apply this update to an in-memory record.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(role) = &self.role {
            user.role = Some(role.clone());
        }
        if let Some(status) = &self.status {
            user.status = Some(status.clone());
        }
        user.updated_at = Some(self.updated_at);
    }
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, DomainError>;

    /// Returns the record after the update, or `None` when no user matched.
    async fn update_user(
        &self,
        id: ObjectId,
        update: UserUpdate,
    ) -> Result<Option<User>, DomainError>;

    /// Returns whether a record was deleted.
    async fn delete_user(&self, id: ObjectId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            UserStatus::Active,
            UserStatus::Inactive,
            UserStatus::Suspended,
            UserStatus::Pending,
        ] {
            assert_eq!(status.as_str().parse::<UserStatus>(), Ok(status));
        }
        assert!("deleted".parse::<UserStatus>().is_err());
    }

    #[test]
    fn update_only_touches_supplied_fields() {
        let mut user = User {
            id: ObjectId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: Some("hash".to_string()),
            role: Some("user".to_string()),
            status: None,
            created_at: None,
            updated_at: None,
        };
        let at = datetime!(2025-01-02 03:04:05 UTC);
        let mut update = UserUpdate::at(at);
        update.email = Some("ada@lovelace.dev".to_string());

        update.apply_to(&mut user);

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@lovelace.dev");
        assert_eq!(user.role.as_deref(), Some("user"));
        assert_eq!(user.updated_at, Some(at));
    }
}
