//! Stored document shapes for the `users` and `products` collections.
//!
//! Field names are camelCase on disk. Conversions to and from the domain
//! models live here so the adapter functions never touch raw BSON.

use bson::oid::ObjectId;
use bson::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repos::products::{NewProduct, Product};
use crate::repos::users::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.id,
            name: doc.name,
            email: doc.email,
            password_hash: doc.password,
            role: doc.role,
            status: doc.status,
            created_at: doc.created_at.map(DateTime::to_time_0_3),
            updated_at: doc.updated_at.map(DateTime::to_time_0_3),
        }
    }
}

impl From<User> for UserDocument {
    fn from(user: User) -> Self {
        UserDocument {
            id: user.id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            status: user.status,
            created_at: user.created_at.map(DateTime::from_time_0_3),
            updated_at: user.updated_at.map(DateTime::from_time_0_3),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub order: i64,
    pub posted_by: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

fn default_status() -> String {
    crate::repos::products::DEFAULT_PRODUCT_STATUS.to_string()
}

impl ProductDocument {
    pub fn from_new(id: ObjectId, product: NewProduct) -> Self {
        product.with_id(id).into()
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Product {
            id: doc.id,
            slug: doc.slug,
            title: doc.title,
            tagline: doc.tagline,
            description: doc.description,
            cover_image: doc.cover_image,
            badge: doc.badge,
            live_link: doc.live_link,
            repo_link: doc.repo_link,
            highlights: doc.highlights,
            features: doc.features,
            cta: doc.cta,
            theme: doc.theme,
            status: doc.status,
            order: doc.order,
            posted_by: doc.posted_by,
            created_at: doc.created_at.map(DateTime::to_time_0_3),
            updated_at: doc.updated_at.map(DateTime::to_time_0_3),
        }
    }
}

impl From<Product> for ProductDocument {
    fn from(p: Product) -> Self {
        ProductDocument {
            id: p.id,
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
            posted_by: p.posted_by,
            created_at: p.created_at.map(DateTime::from_time_0_3),
            updated_at: p.updated_at.map(DateTime::from_time_0_3),
        }
    }
}
