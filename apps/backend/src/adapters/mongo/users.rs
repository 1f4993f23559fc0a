use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;

use super::dto::UserDocument;
use super::MongoStore;
use crate::errors::domain::DomainError;
use crate::repos::users::{User, UserRepo, UserUpdate};

fn set_document(update: UserUpdate) -> Document {
    let mut set = doc! { "updatedAt": DateTime::from_time_0_3(update.updated_at) };
    if let Some(name) = update.name {
        set.insert("name", name);
    }
    if let Some(email) = update.email {
        set.insert("email", email);
    }
    if let Some(role) = update.role {
        set.insert("role", role);
    }
    if let Some(status) = update.status {
        set.insert("status", status);
    }
    set
}

#[async_trait]
impl UserRepo for MongoStore {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let docs: Vec<UserDocument> = self.users().find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, DomainError> {
        let found = self.users().find_one(doc! { "_id": id }).await?;
        Ok(found.map(User::from))
    }

    async fn update_user(
        &self,
        id: ObjectId,
        update: UserUpdate,
    ) -> Result<Option<User>, DomainError> {
        let updated = self
            .users()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_document(update) })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(User::from))
    }

    async fn delete_user(&self, id: ObjectId) -> Result<bool, DomainError> {
        let result = self.users().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn set_document_only_carries_supplied_fields() {
        let mut update = UserUpdate::at(datetime!(2025-03-01 00:00:00 UTC));
        update.status = Some("suspended".to_string());

        let set = set_document(update);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("status").unwrap(), "suspended");
        assert!(set.get_datetime("updatedAt").is_ok());
    }
}
