//! MongoDB adapter against a live server.
//!
//! Ignored by default. Run with a disposable database:
//!   TEST_DB_URI=mongodb://localhost:27017/catalog_test cargo test --test mongo_store_test -- --ignored

mod common;

use bson::oid::ObjectId;
use catalog_api::adapters::mongo::MongoStore;
use catalog_api::repos::products::{NewProduct, ProductUpdate};
use catalog_api::repos::users::{User, UserUpdate};
use catalog_api::repos::{ProductRepo, Store, UserRepo};
use catalog_test_support::unique_helpers::{unique_email, unique_slug};
use serde_json::json;
use time::OffsetDateTime;

async fn store() -> MongoStore {
    let uri = std::env::var("TEST_DB_URI").expect("TEST_DB_URI must be set for mongo tests");
    let store = MongoStore::connect(&uri, "catalog_test")
        .await
        .expect("should connect");
    store.ping().await.expect("mongo should answer ping");
    store
}

async fn seed_user(store: &MongoStore) -> User {
    let user = User {
        id: ObjectId::new(),
        name: "Mongo Tester".to_string(),
        email: unique_email("mongo"),
        password_hash: Some("hash".to_string()),
        role: Some("admin".to_string()),
        status: Some("active".to_string()),
        created_at: Some(OffsetDateTime::now_utc()),
        updated_at: None,
    };
    store
        .database()
        .collection::<catalog_api::adapters::mongo::UserDocument>("users")
        .insert_one(catalog_api::adapters::mongo::UserDocument::from(user.clone()))
        .await
        .expect("seed user");
    user
}

#[tokio::test]
#[ignore]
async fn user_update_returns_document_after_change() {
    let store = store().await;
    let user = seed_user(&store).await;

    let mut update = UserUpdate::at(OffsetDateTime::now_utc());
    update.status = Some("suspended".to_string());
    let updated = store.update_user(user.id, update).await.unwrap().unwrap();

    assert_eq!(updated.status.as_deref(), Some("suspended"));
    assert_eq!(updated.email, user.email);
    assert!(store.delete_user(user.id).await.unwrap());
    assert!(store.find_user(user.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn product_listing_joins_poster_without_password() {
    let store = store().await;
    let user = seed_user(&store).await;
    let slug = unique_slug("mongo");

    let product = store
        .insert_product(NewProduct {
            slug: slug.clone(),
            title: "Mongo product".to_string(),
            tagline: None,
            description: None,
            cover_image: None,
            badge: None,
            live_link: None,
            repo_link: None,
            highlights: Some(vec!["a".to_string()]),
            features: None,
            cta: Some(json!({ "label": "Go" })),
            theme: None,
            status: "active".to_string(),
            order: -1000,
            posted_by: user.id,
            created_at: OffsetDateTime::now_utc(),
        })
        .await
        .unwrap();

    let listing = store.list_products_with_poster().await.unwrap();
    let ours = listing
        .iter()
        .find(|l| l.product.id == product.id)
        .expect("inserted product is listed");
    let poster = ours.posted_by.as_ref().expect("poster joined");
    assert_eq!(poster.id, user.id);
    assert!(poster.password_hash.is_none());

    let update = ProductUpdate {
        slug: None,
        title: Some("Renamed".to_string()),
        tagline: None,
        description: None,
        cover_image: None,
        badge: None,
        live_link: None,
        repo_link: None,
        highlights: None,
        features: None,
        cta: None,
        theme: None,
        status: None,
        order: None,
        updated_at: OffsetDateTime::now_utc(),
    };
    let updated = store.update_product(product.id, update).await.unwrap().unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.slug, slug);
    assert_eq!(updated.posted_by, user.id);

    assert!(store.delete_product(product.id).await.unwrap());
    assert!(store.delete_user(user.id).await.unwrap());
}
