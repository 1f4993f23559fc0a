//! MongoDB adapter for the store seam.

use async_trait::async_trait;
use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::errors::domain::DomainError;
use crate::repos::Store;

pub mod dto;
mod products;
mod users;

pub use dto::{ProductDocument, UserDocument};

pub const USERS_COLLECTION: &str = "users";
pub const PRODUCTS_COLLECTION: &str = "products";

#[derive(Clone, Debug)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect using `uri`. The database is the URI's default database, or
    /// `fallback_db` when the URI names none.
    pub async fn connect(uri: &str, fallback_db: &str) -> Result<Self, DomainError> {
        let options = ClientOptions::parse(uri).await?;
        let db_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| fallback_db.to_string());
        let client = Client::with_options(options)?;

        info!(database = %db_name, "mongodb client created");
        Ok(Self::from_database(client.database(&db_name)))
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn users(&self) -> Collection<UserDocument> {
        self.db.collection(USERS_COLLECTION)
    }

    fn products(&self) -> Collection<ProductDocument> {
        self.db.collection(PRODUCTS_COLLECTION)
    }
}

#[async_trait]
impl Store for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
