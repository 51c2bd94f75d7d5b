//! Blog registry - plain CRUD passthrough keyed by identifier.

use std::sync::Arc;

use uuid::Uuid;

use crate::storage::{
    DeleteResult, Document, DocumentStore, Filter, FindOptions, InsertResult, StorageError,
    UpdateResult, ID_FIELD,
};

use super::RegistryError;

pub const COLLECTION: &str = "blogs";

/// Service over the blog collection. No state machine.
#[derive(Clone)]
pub struct BlogRegistry {
    store: Arc<dyn DocumentStore>,
}

impl BlogRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, mut payload: Document) -> Result<InsertResult, RegistryError> {
        payload.remove(ID_FIELD);
        Ok(self.store.insert_one(COLLECTION, payload).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Document>, RegistryError> {
        Ok(self
            .store
            .find(COLLECTION, Filter::All, FindOptions::default())
            .await?)
    }

    /// Shallow-merge `fields` into the blog post (publish toggles, edits).
    pub async fn update(
        &self,
        id: &str,
        mut fields: Document,
    ) -> Result<UpdateResult, RegistryError> {
        let id = parse_id(id)?;
        fields.remove(ID_FIELD);
        Ok(self.store.update_by_id(COLLECTION, id, fields).await?)
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteResult, RegistryError> {
        let id = parse_id(id)?;
        Ok(self.store.delete_by_id(COLLECTION, id).await?)
    }
}

fn parse_id(id: &str) -> Result<Uuid, RegistryError> {
    Uuid::parse_str(id)
        .map_err(|_| StorageError::InvalidIdentifier(id.to_string()).into())
}
