use bson::oid::ObjectId;
use catalog_api::repos::users::User;
use catalog_test_support::unique_helpers::{unique_email, unique_str};
use time::OffsetDateTime;

/// A stored user with the given role.
pub fn user_with_role(role: &str) -> User {
    User {
        id: ObjectId::new(),
        name: unique_str("user"),
        email: unique_email(role),
        password_hash: Some("$2b$10$not-a-real-hash".to_string()),
        role: Some(role.to_string()),
        status: Some("active".to_string()),
        created_at: Some(OffsetDateTime::now_utc()),
        updated_at: None,
    }
}
