//! Storage module for the API.
//!
//! Provides the schemaless document store the registries are built on,
//! plus the in-memory backend implementation.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryDocumentStore;
pub use traits::{
    DeleteResult, Document, DocumentStore, Filter, FindOptions, InsertResult, Sort, SortOrder,
    UpdateResult, ID_FIELD,
};
