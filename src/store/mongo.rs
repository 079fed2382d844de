use serde_json::Value;
use mongodb::Collection;
use async_trait::async_trait;
use mongodb::bson::{ doc, Document };

use crate::builtins::mongo::MongoDB;
use super::{ ConfigStore, StoreError };

const COLLECTION: &str = "app_config";

/// Key-value backend: the whole AppConfig lives as the single document of the
/// `app_config` collection.
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new() -> Self {
        let db = MongoDB.connect();

        MongoStore {
            collection: db.collection::<Document>(COLLECTION),
        }
    }

    fn to_document(document: &Value) -> Result<Document, StoreError> {
        mongodb::bson::to_document(document).map_err(StoreError::backend)
    }

    fn to_value(mut document: Document) -> Result<Value, StoreError> {
        document.remove("_id");
        serde_json::to_value(&document).map_err(StoreError::backend)
    }
}

#[async_trait]
impl ConfigStore for MongoStore {
    async fn load(&self) -> Result<Option<Value>, StoreError> {
        let result = self.collection.find_one(doc! {}).await;

        match result.map_err(StoreError::backend)? {
            Some(document) => Ok(Some(Self::to_value(document)?)),
            None => Ok(None),
        }
    }

    async fn seed(&self, document: &Value) -> Result<Value, StoreError> {
        let insert = Self::to_document(document)?;

        // $setOnInsert behind an upsert: concurrent first reads collapse to
        // a single inserted document instead of racing inserts.
        self.collection
            .update_one(doc! {}, doc! { "$setOnInsert": insert })
            .upsert(true)
            .await
            .map_err(StoreError::backend)?;

        match self.load().await? {
            Some(stored) => Ok(stored),
            None => Ok(document.clone()),
        }
    }

    async fn replace(&self, document: &Value) -> Result<(), StoreError> {
        let replacement = Self::to_document(document)?;

        self.collection
            .replace_one(doc! {}, replacement)
            .upsert(true)
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }
}
