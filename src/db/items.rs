use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tokio_stream::StreamExt;

use crate::error::{AppError, AppResult};
use crate::models::Item;

pub const ITEMS_COLLECTION: &str = "inventory";

/// Data access for inventory items.
///
/// The endpoint layer holds this behind `Arc<dyn ItemRepository>` so tests
/// can substitute an in-memory implementation.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item. The storage layer assigns the id.
    async fn create(&self, name: String, quantity: i64, image: String) -> AppResult<Item>;

    /// Every item in the collection, in storage-native order.
    async fn list_all(&self) -> AppResult<Vec<Item>>;

    /// Overwrite `name` and `quantity`, leaving `image` untouched, and
    /// return the post-update record.
    async fn update_by_id(&self, id: &str, name: String, quantity: i64) -> AppResult<Item>;

    /// Hard-delete the item with the given id.
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

pub struct MongoItemRepository {
    collection: Collection<Item>,
}

impl MongoItemRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(ITEMS_COLLECTION),
        }
    }

    /// An id that is not valid ObjectId hex matches no stored record.
    fn parse_id(id: &str) -> AppResult<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| AppError::NotFound(format!("item {} not found", id)))
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    async fn create(&self, name: String, quantity: i64, image: String) -> AppResult<Item> {
        let document = doc! {
            "name": &name,
            "quantity": quantity,
            "image": &image,
        };

        let result = self
            .collection
            .clone_with_type::<Document>()
            .insert_one(document)
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Internal("insert returned a non-ObjectId key".to_string()))?;

        Ok(Item {
            id,
            name,
            quantity,
            image,
        })
    }

    async fn list_all(&self) -> AppResult<Vec<Item>> {
        let mut cursor = self.collection.find(doc! {}).await?;

        let mut items = Vec::new();
        while let Some(item) = cursor.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    async fn update_by_id(&self, id: &str, name: String, quantity: i64) -> AppResult<Item> {
        let object_id = Self::parse_id(id)?;

        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": { "name": &name, "quantity": quantity } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("item {} not found", id)))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let object_id = Self::parse_id(id)?;

        let result = self.collection.delete_one(doc! { "_id": object_id }).await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("item {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_object_id_hex() {
        let id = MongoItemRepository::parse_id("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_parse_id_rejects_garbage_as_not_found() {
        let err = MongoItemRepository::parse_id("not-an-id").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
