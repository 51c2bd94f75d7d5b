//! Services module - registries owning business logic over the document store.

pub mod blog_registry;
pub mod donation_registry;
pub mod user_registry;

pub use blog_registry::BlogRegistry;
pub use donation_registry::DonationRequestRegistry;
pub use user_registry::UserRegistry;

use crate::storage::StorageError;

/// Errors surfaced by registry operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Unrecognised enum value or illegal status transition.
    #[error("Validation failed: {0}")]
    Validation(String),
}
