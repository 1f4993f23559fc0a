//! In-process store used by tests and local runs without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use parking_lot::RwLock;

use crate::errors::domain::DomainError;
use crate::repos::products::{
    listing_order, NewProduct, Product, ProductListing, ProductRepo, ProductUpdate,
};
use crate::repos::users::{User, UserRepo, UserUpdate};
use crate::repos::Store;

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record as-is.
    pub fn insert_user(&self, user: User) {
        self.users.write().push(user);
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    pub fn product_count(&self) -> usize {
        self.products.read().len()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().clone())
    }

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn update_user(
        &self,
        id: ObjectId,
        update: UserUpdate,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write();
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            update.apply_to(user);
            user.clone()
        }))
    }

    async fn delete_user(&self, id: ObjectId) -> Result<bool, DomainError> {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl ProductRepo for MemoryStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, DomainError> {
        let product = product.with_id(ObjectId::new());
        self.products.write().push(product.clone());
        Ok(product)
    }

    async fn list_products_with_poster(&self) -> Result<Vec<ProductListing>, DomainError> {
        let mut products = self.products.read().clone();
        products.sort_by(listing_order);

        let posters: HashMap<ObjectId, User> = self
            .users
            .read()
            .iter()
            .map(|u| (u.id, u.clone()))
            .collect();

        Ok(products
            .into_iter()
            .map(|product| ProductListing {
                posted_by: posters.get(&product.posted_by).cloned(),
                product,
            })
            .collect())
    }

    async fn update_product(
        &self,
        id: ObjectId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, DomainError> {
        let mut products = self.products.write();
        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            update.apply_to(product);
            product.clone()
        }))
    }

    async fn delete_product(&self, id: ObjectId) -> Result<bool, DomainError> {
        let mut products = self.products.write();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
