use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use serde_json::Value;

use super::dto::{ProductDocument, UserDocument};
use super::{MongoStore, USERS_COLLECTION};
use crate::errors::domain::DomainError;
use crate::repos::products::{NewProduct, Product, ProductListing, ProductRepo, ProductUpdate};
use crate::repos::users::User;

const POSTER_FIELD: &str = "poster";

/// Join each product with its poster, drop the poster's password hash and
/// sort by `order` ascending then newest first.
fn listing_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$lookup": {
                "from": USERS_COLLECTION,
                "localField": "postedBy",
                "foreignField": "_id",
                "as": POSTER_FIELD,
            }
        },
        doc! {
            "$addFields": {
                "poster": { "$ifNull": [{ "$arrayElemAt": ["$poster", 0] }, Bson::Null] }
            }
        },
        doc! { "$project": { "poster.password": 0 } },
        doc! { "$sort": { "order": 1, "createdAt": -1 } },
    ]
}

fn decode_listing(mut raw: Document) -> Result<ProductListing, DomainError> {
    let posted_by = match raw.remove(POSTER_FIELD) {
        Some(Bson::Document(poster)) => {
            let poster: UserDocument = bson::from_document(poster)
                .map_err(|e| DomainError::decode(format!("poster: {e}")))?;
            Some(User::from(poster))
        }
        _ => None,
    };
    let product: ProductDocument = bson::from_document(raw)
        .map_err(|e| DomainError::decode(format!("product: {e}")))?;

    Ok(ProductListing {
        product: product.into(),
        posted_by,
    })
}

fn json_to_bson(field: &str, value: Value) -> Result<Bson, DomainError> {
    bson::to_bson(&value).map_err(|e| DomainError::decode(format!("{field}: {e}")))
}

fn set_document(update: ProductUpdate) -> Result<Document, DomainError> {
    let mut set = doc! { "updatedAt": DateTime::from_time_0_3(update.updated_at) };

    let strings = [
        ("slug", update.slug),
        ("title", update.title),
        ("tagline", update.tagline),
        ("description", update.description),
        ("coverImage", update.cover_image),
        ("badge", update.badge),
        ("liveLink", update.live_link),
        ("repoLink", update.repo_link),
        ("status", update.status),
    ];
    for (field, value) in strings {
        if let Some(value) = value {
            set.insert(field, value);
        }
    }
    if let Some(highlights) = update.highlights {
        set.insert("highlights", highlights);
    }
    if let Some(features) = update.features {
        set.insert("features", features);
    }
    if let Some(cta) = update.cta {
        set.insert("cta", json_to_bson("cta", cta)?);
    }
    if let Some(theme) = update.theme {
        set.insert("theme", json_to_bson("theme", theme)?);
    }
    if let Some(order) = update.order {
        set.insert("order", order);
    }
    Ok(set)
}

#[async_trait]
impl ProductRepo for MongoStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, DomainError> {
        let stored = ProductDocument::from_new(ObjectId::new(), product);
        self.products().insert_one(&stored).await?;
        Ok(stored.into())
    }

    async fn list_products_with_poster(&self) -> Result<Vec<ProductListing>, DomainError> {
        let raw: Vec<Document> = self
            .products()
            .aggregate(listing_pipeline())
            .await?
            .try_collect()
            .await?;
        raw.into_iter().map(decode_listing).collect()
    }

    async fn update_product(
        &self,
        id: ObjectId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, DomainError> {
        let updated = self
            .products()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_document(update)? })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Product::from))
    }

    async fn delete_product(&self, id: ObjectId) -> Result<bool, DomainError> {
        let result = self.products().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
