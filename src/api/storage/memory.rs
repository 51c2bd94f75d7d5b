//! In-memory document store backend.
//!
//! Collections are insertion-ordered vectors behind a single RwLock, so
//! unsorted finds return documents in insertion order and each operation
//! is atomic with respect to the others. This is the backend used by the
//! server binary and the test suites.

use std::cmp::Ordering;
use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::{
    DeleteResult, Document, FindOptions, Filter, InsertResult, SortOrder, UpdateResult, ID_FIELD,
};
use super::StorageError;

/// In-memory [`DocumentStore`](super::DocumentStore) implementation.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Total order over JSON values for sort keys. Nulls and missing fields
/// sort first, then booleans, numbers, strings; anything else falls back
/// to its serialized form. ISO dates compare correctly as strings.
fn cmp_values(a: &serde_json::Value, b: &serde_json::Value) -> Ordering {
    use serde_json::Value;

    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            _ => 4,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ if rank(a) != rank(b) => rank(a).cmp(&rank(b)),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn doc_id(doc: &Document) -> Option<Uuid> {
    doc.get(ID_FIELD)
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[async_trait::async_trait]
impl super::DocumentStore for MemoryDocumentStore {
    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<InsertResult, StorageError> {
        let id = Uuid::new_v4();
        document.insert(ID_FIELD.to_string(), serde_json::Value::String(id.to_string()));

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(InsertResult { inserted_id: id })
    }

    async fn find(
        &self,
        collection: &str,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StorageError> {
        let collections = self.collections.read().await;
        let mut matched: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = &options.sort {
            let null = serde_json::Value::Null;
            matched.sort_by(|a, b| {
                let (av, bv) = (
                    a.get(&sort.field).unwrap_or(&null),
                    b.get(&sort.field).unwrap_or(&null),
                );
                let ordering = match sort.order {
                    SortOrder::Ascending => cmp_values(av, bv),
                    SortOrder::Descending => cmp_values(bv, av),
                };
                // Deterministic tie-break: identifier ascending
                ordering.then_with(|| doc_id(a).cmp(&doc_id(b)))
            });
        }

        if let Some(limit) = options.limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| doc_id(d) == Some(id)).cloned()))
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        fields: Document,
    ) -> Result<UpdateResult, StorageError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| doc_id(d) == Some(id)))
        else {
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            });
        };

        let mut modified = false;
        for (key, value) in fields {
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        fields: Document,
    ) -> Result<UpdateResult, StorageError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            });
        };

        let mut modified = false;
        for (key, value) in fields {
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<DeleteResult, StorageError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(DeleteResult { deleted_count: 0 });
        };

        let before = docs.len();
        docs.retain(|d| doc_id(d) != Some(id));

        Ok(DeleteResult {
            deleted_count: (before - docs.len()) as u64,
        })
    }
}
