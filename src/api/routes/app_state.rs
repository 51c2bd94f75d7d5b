//! Application state management.
//!
//! The state holds the shared document store handle; registries are
//! constructed per use with the handle injected, so no handler depends on
//! global store state.

use std::sync::Arc;

use crate::services::{BlogRegistry, DonationRequestRegistry, UserRegistry};
use crate::storage::{DocumentStore, MemoryDocumentStore};

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared document store backend
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create application state over the in-memory store backend.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryDocumentStore::new()))
    }

    /// Create application state over an explicit store backend.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn donation_requests(&self) -> DonationRequestRegistry {
        DonationRequestRegistry::new(self.store.clone())
    }

    pub fn users(&self) -> UserRegistry {
        UserRegistry::new(self.store.clone())
    }

    pub fn blogs(&self) -> BlogRegistry {
        BlogRegistry::new(self.store.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
