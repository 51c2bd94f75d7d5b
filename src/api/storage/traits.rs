//! Document store trait definitions.
//!
//! The store is schemaless: records are JSON objects keyed by a
//! store-assigned UUID under the top-level `id` field. Collections are
//! addressed by name. Every operation is a single atomic store call;
//! there are no multi-document transactions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A schemaless record as stored: a JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Field name the store writes the assigned identifier under.
pub const ID_FIELD: &str = "id";

/// Equality filter over top-level document fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Match every document in the collection.
    All,
    /// Match documents whose `field` equals `value` exactly.
    Eq(String, Value),
    /// Match documents satisfying every sub-filter.
    And(Vec<Filter>),
}

impl Filter {
    /// Equality filter helper.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    /// Whether `doc` satisfies this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::All => true,
            Self::Eq(field, value) => doc.get(field) == Some(value),
            Self::And(filters) => filters.iter().all(|f| f.matches(doc)),
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort specification for a find query.
#[derive(Clone, Debug)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    /// Sort by `field` descending (most recent first for date fields).
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }
}

/// Options applied to a find query after filtering.
#[derive(Clone, Debug, Default)]
pub struct FindOptions {
    pub sort: Option<Sort>,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn sorted(sort: Sort) -> Self {
        Self {
            sort: Some(sort),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Acknowledgement returned by an insert.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsertResult {
    pub inserted_id: Uuid,
}

/// Acknowledgement returned by an update. Updating an absent id is a
/// no-op with both counts zero, not an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Acknowledgement returned by a delete. Deleting an absent id is a
/// no-op with `deleted_count` zero, not an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Backend trait for schemaless document storage.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, assigning it a fresh identifier. The identifier
    /// is written into the stored document under [`ID_FIELD`].
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertResult, super::StorageError>;

    /// Find all documents matching `filter`, in insertion order unless
    /// `options.sort` is set. Sort ties break by identifier ascending.
    async fn find(
        &self,
        collection: &str,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, super::StorageError>;

    /// Find a single document by identifier.
    async fn find_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, super::StorageError>;

    /// Find the first document matching `filter`, in insertion order.
    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Option<Document>, super::StorageError> {
        let mut found = self
            .find(collection, filter, FindOptions::default().limit(1))
            .await?;
        Ok(found.pop())
    }

    /// Shallow-merge `fields` into the document with the given identifier:
    /// supplied top-level keys overwrite, all other fields are untouched.
    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        fields: Document,
    ) -> Result<UpdateResult, super::StorageError>;

    /// Shallow-merge `fields` into the first document matching `filter`.
    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        fields: Document,
    ) -> Result<UpdateResult, super::StorageError>;

    /// Delete the document with the given identifier.
    async fn delete_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<DeleteResult, super::StorageError>;
}
