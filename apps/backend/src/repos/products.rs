//! Product repository contract and domain model.

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::Value;
use time::OffsetDateTime;

use crate::errors::domain::DomainError;
use crate::repos::users::User;

pub const DEFAULT_PRODUCT_STATUS: &str = "active";

/// Product domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ObjectId,
    pub slug: String,
    pub title: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub badge: Option<String>,
    pub live_link: Option<String>,
    pub repo_link: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub cta: Option<Value>,
    pub theme: Option<Value>,
    pub status: String,
    pub order: i64,
    pub posted_by: ObjectId,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

/// A product about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub slug: String,
    pub title: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub badge: Option<String>,
    pub live_link: Option<String>,
    pub repo_link: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub cta: Option<Value>,
    pub theme: Option<Value>,
    pub status: String,
    pub order: i64,
    pub posted_by: ObjectId,
    pub created_at: OffsetDateTime,
}

impl NewProduct {
    pub fn with_id(self, id: ObjectId) -> Product {
        Product {
            id,
            slug: self.slug,
            title: self.title,
            tagline: self.tagline,
            description: self.description,
            cover_image: self.cover_image,
            badge: self.badge,
            live_link: self.live_link,
            repo_link: self.repo_link,
            highlights: self.highlights,
            features: self.features,
            cta: self.cta,
            theme: self.theme,
            status: self.status,
            order: self.order,
            posted_by: self.posted_by,
            created_at: Some(self.created_at),
            updated_at: None,
        }
    }
}

/// Partial update; `None` fields are left untouched. Ownership (`posted_by`),
/// identity and creation time are not updatable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub badge: Option<String>,
    pub live_link: Option<String>,
    pub repo_link: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub cta: Option<Value>,
    pub theme: Option<Value>,
    pub status: Option<String>,
    pub order: Option<i64>,
    pub updated_at: OffsetDateTime,
}

impl ProductUpdate {
    pub fn apply_to(&self, product: &mut Product) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        set(&mut product.slug, &self.slug);
        set(&mut product.title, &self.title);
        set_opt(&mut product.tagline, &self.tagline);
        set_opt(&mut product.description, &self.description);
        set_opt(&mut product.cover_image, &self.cover_image);
        set_opt(&mut product.badge, &self.badge);
        set_opt(&mut product.live_link, &self.live_link);
        set_opt(&mut product.repo_link, &self.repo_link);
        set_opt(&mut product.highlights, &self.highlights);
        set_opt(&mut product.features, &self.features);
        set_opt(&mut product.cta, &self.cta);
        set_opt(&mut product.theme, &self.theme);
        set(&mut product.status, &self.status);
        set(&mut product.order, &self.order);
        product.updated_at = Some(self.updated_at);
    }
}

/// A product joined with the user who posted it, if that user still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub product: Product,
    pub posted_by: Option<User>,
}

/// Listing order: `order` ascending, then newest first.
pub fn listing_order(a: &Product, b: &Product) -> std::cmp::Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

#[async_trait]
pub trait ProductRepo: Send + Sync {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, DomainError>;

    /// All products with their poster, in [`listing_order`].
    async fn list_products_with_poster(&self) -> Result<Vec<ProductListing>, DomainError>;

    /// Returns the record after the update, or `None` when no product matched.
    async fn update_product(
        &self,
        id: ObjectId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, DomainError>;

    /// Returns whether a record was deleted.
    async fn delete_product(&self, id: ObjectId) -> Result<bool, DomainError>;
}
