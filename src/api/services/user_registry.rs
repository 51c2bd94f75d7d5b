//! User registry - plain CRUD passthrough keyed by email.

use std::sync::Arc;

use crate::storage::{
    Document, DocumentStore, Filter, FindOptions, InsertResult, UpdateResult, ID_FIELD,
};

use super::RegistryError;

pub const COLLECTION: &str = "users";

/// Service over the user collection. No state machine, no filtering
/// beyond exact-match lookup by email.
#[derive(Clone)]
pub struct UserRegistry {
    store: Arc<dyn DocumentStore>,
}

impl UserRegistry {
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

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Document>, RegistryError> {
        Ok(self
            .store
            .find_one(COLLECTION, Filter::eq("email", email))
            .await?)
    }

    /// Shallow-merge `fields` into the user with the given email. Serves
    /// both the status and role patch endpoints.
    pub async fn update_by_email(
        &self,
        email: &str,
        mut fields: Document,
    ) -> Result<UpdateResult, RegistryError> {
        fields.remove(ID_FIELD);
        fields.remove("email");
        Ok(self
            .store
            .update_one(COLLECTION, Filter::eq("email", email), fields)
            .await?)
    }
}
