//! Repository traits for the domain layer.
//!
//! Handlers talk to a single `Store` object; adapters under `crate::adapters`
//! implement it for MongoDB and for an in-process memory backend.

use async_trait::async_trait;

use crate::errors::domain::DomainError;

pub mod products;
pub mod users;

pub use products::{NewProduct, Product, ProductListing, ProductRepo, ProductUpdate};
pub use users::{User, UserRepo, UserStatus, UserUpdate};

/// Both collections behind one handle.
#[async_trait]
pub trait Store: UserRepo + ProductRepo {
    /// Short backend label for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Cheap round trip proving the backend is reachable.
    async fn ping(&self) -> Result<(), DomainError>;
}
