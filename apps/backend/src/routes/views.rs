//! Response bodies shared by the route handlers.

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::repos::products::{Product, ProductListing};
use crate::repos::users::User;

pub(crate) fn rfc3339(ts: Option<OffsetDateTime>) -> Option<String> {
    ts.and_then(|t| t.format(&Rfc3339).ok())
}

/// `{ success: true, count, data: [...] }`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{ success: true, message?, data }`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// `{ success: true, message }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// A user as returned by the API. The password hash never leaves the store.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            created_at: rfc3339(user.created_at),
            updated_at: rfc3339(user.updated_at),
        }
    }
}

/// A product as returned by the API. `posted_by` is the poster's id on
/// writes and the joined poster (or null) on listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<P> {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<serde_json::Value>,
    pub status: String,
    pub order: i64,
    pub posted_by: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl<P> ProductView<P> {
    fn build(p: Product, posted_by: P) -> Self {
        ProductView {
            id: p.id.to_hex(),
            slug: p.slug,
            title: p.title,
            tagline: p.tagline,
            description: p.description,
            cover_image: p.cover_image,
            badge: p.badge,
            live_link: p.live_link,
            repo_link: p.repo_link,
            highlights: p.highlights,
            features: p.features,
            cta: p.cta,
            theme: p.theme,
            status: p.status,
            order: p.order,
            posted_by,
            created_at: rfc3339(p.created_at),
            updated_at: rfc3339(p.updated_at),
        }
    }
}

impl From<Product> for ProductView<String> {
    fn from(p: Product) -> Self {
        let posted_by = p.posted_by.to_hex();
        ProductView::build(p, posted_by)
    }
}

impl From<ProductListing> for ProductView<Option<UserView>> {
    fn from(listing: ProductListing) -> Self {
        ProductView::build(listing.product, listing.posted_by.map(UserView::from))
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn user_view_drops_password_and_formats_times() {
        let user = User {
            id: ObjectId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: Some("$2b$10$hash".to_string()),
            role: Some("admin".to_string()),
            status: None,
            created_at: Some(datetime!(2025-01-02 03:04:05 UTC)),
            updated_at: None,
        };
        let id = user.id.to_hex();

        let json = serde_json::to_value(UserView::from(user)).unwrap();

        assert_eq!(json["_id"], id);
        assert_eq!(json["createdAt"], "2025-01-02T03:04:05Z");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn list_response_counts_items() {
        let json = serde_json::to_value(ListResponse::new(vec![1, 2, 3])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 3);
    }
}
