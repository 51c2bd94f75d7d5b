//! Donation request registry - owns all read/write access to donation
//! request records and is the sole authority on status transitions.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::DonationStatus;
use crate::storage::{
    DeleteResult, Document, DocumentStore, Filter, FindOptions, InsertResult, Sort, StorageError,
    UpdateResult, ID_FIELD,
};

use super::RegistryError;

/// Collection holding donation request documents.
pub const COLLECTION: &str = "donation_requests";

/// Status field interpreted by the lifecycle logic.
pub const STATUS_FIELD: &str = "donation_status";

/// Ownership field, immutable after creation.
pub const OWNER_FIELD: &str = "requester_email";

/// Recency ordering key.
pub const DATE_FIELD: &str = "selectedDate";

/// Default result size for the recent-requests view.
pub const RECENT_LIMIT: usize = 3;

/// Fields a merge update may never change. Stripped rather than rejected,
/// since clients routinely echo whole documents back on edit.
const IMMUTABLE_FIELDS: [&str; 3] = [ID_FIELD, "_id", OWNER_FIELD];

/// Service over the donation request collection. The store handle is
/// injected per instance; there is no shared module state.
#[derive(Clone)]
pub struct DonationRequestRegistry {
    store: Arc<dyn DocumentStore>,
}

impl DonationRequestRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Every donation request, in store order. No pagination.
    pub async fn list_all(&self) -> Result<Vec<Document>, RegistryError> {
        Ok(self
            .store
            .find(COLLECTION, Filter::All, FindOptions::default())
            .await?)
    }

    /// Insert a fully-formed payload and return the assigned identifier.
    ///
    /// The payload is trusted except for the lifecycle fields: a supplied
    /// identifier is discarded (the store assigns one), a missing status
    /// defaults to the machine's initial state, and a present status must
    /// be a recognised value.
    pub async fn create(&self, mut payload: Document) -> Result<InsertResult, RegistryError> {
        payload.remove(ID_FIELD);
        payload.remove("_id");

        match payload.get(STATUS_FIELD) {
            None => {
                payload.insert(
                    STATUS_FIELD.to_string(),
                    Value::String(DonationStatus::INITIAL.as_str().to_string()),
                );
            }
            Some(value) => {
                parse_status(value)?;
            }
        }

        let result = self.store.insert_one(COLLECTION, payload).await?;
        debug!(id = %result.inserted_id, "created donation request");
        Ok(result)
    }

    /// All requests owned by `email`, optionally restricted to a status.
    ///
    /// The status restriction is applied in memory after the owner query,
    /// matching the store's single-predicate owner lookup. An empty or
    /// whitespace email yields an empty result, never an error.
    pub async fn find_by_owner(
        &self,
        email: &str,
        status_filter: Option<&str>,
    ) -> Result<Vec<Document>, RegistryError> {
        if email.trim().is_empty() {
            warn!("owner lookup with empty email");
            return Ok(Vec::new());
        }

        let status = status_filter
            .map(|s| {
                s.parse::<DonationStatus>()
                    .map_err(|e| RegistryError::Validation(e.to_string()))
            })
            .transpose()?;

        let mut records = self
            .store
            .find(
                COLLECTION,
                Filter::eq(OWNER_FIELD, email),
                FindOptions::default(),
            )
            .await?;

        if let Some(status) = status {
            records.retain(|doc| {
                doc.get(STATUS_FIELD).and_then(Value::as_str) == Some(status.as_str())
            });
        }

        Ok(records)
    }

    /// The owner's most recent requests: ordered by `selectedDate`
    /// descending (ties broken by identifier ascending), truncated to
    /// `limit`.
    pub async fn recent_by_owner(
        &self,
        email: &str,
        limit: usize,
    ) -> Result<Vec<Document>, RegistryError> {
        if email.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .store
            .find(
                COLLECTION,
                Filter::eq(OWNER_FIELD, email),
                FindOptions::sorted(Sort::descending(DATE_FIELD)).limit(limit),
            )
            .await?)
    }

    /// The single request with the given identifier.
    pub async fn get_by_id(&self, id: &str) -> Result<Document, RegistryError> {
        let id = parse_id(id)?;
        self.store
            .find_by_id(COLLECTION, id)
            .await?
            .ok_or_else(|| {
                StorageError::NotFound {
                    collection: COLLECTION.to_string(),
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// Shallow-merge `fields` into the record. Immutable fields
    /// (identifier, ownership) are stripped from the merge. Updating an
    /// absent id is a no-op acknowledgement, not an error.
    ///
    /// A `donation_status` supplied here merges unvalidated; status
    /// validation is deliberately scoped to
    /// [`update_status`](Self::update_status), the transition authority.
    pub async fn update(
        &self,
        id: &str,
        mut fields: Document,
    ) -> Result<UpdateResult, RegistryError> {
        let id = parse_id(id)?;
        strip_immutable(&mut fields);
        Ok(self.store.update_by_id(COLLECTION, id, fields).await?)
    }

    /// Merge semantics identical to [`update`](Self::update), plus status
    /// validation: a supplied `donation_status` must be a recognised value
    /// and a legal transition from the record's current status. Terminal
    /// states (`done`, `cancelled`) accept only an idempotent rewrite.
    pub async fn update_status(
        &self,
        id: &str,
        mut fields: Document,
    ) -> Result<UpdateResult, RegistryError> {
        let id = parse_id(id)?;
        strip_immutable(&mut fields);

        if let Some(value) = fields.get(STATUS_FIELD) {
            let next = parse_status(value)?;

            let Some(current_doc) = self.store.find_by_id(COLLECTION, id).await? else {
                // Nothing to transition; same no-op ack as a plain update.
                return Ok(UpdateResult {
                    matched_count: 0,
                    modified_count: 0,
                });
            };

            // A stored status outside the recognised set cannot be
            // validated; let the write through to bring the record back
            // into the closed set.
            let current = current_doc
                .get(STATUS_FIELD)
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<DonationStatus>().ok());

            if let Some(current) = current {
                if !current.can_transition_to(next) {
                    return Err(RegistryError::Validation(format!(
                        "illegal status transition: {current} -> {next}"
                    )));
                }
            }
            debug!(%id, status = %next, "status transition accepted");
        }

        Ok(self.store.update_by_id(COLLECTION, id, fields).await?)
    }

    /// Remove the record. Deleting an absent id is a no-op (idempotent).
    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteResult, RegistryError> {
        let id = parse_id(id)?;
        Ok(self.store.delete_by_id(COLLECTION, id).await?)
    }
}

fn parse_id(id: &str) -> Result<Uuid, RegistryError> {
    Uuid::parse_str(id)
        .map_err(|_| StorageError::InvalidIdentifier(id.to_string()).into())
}

fn parse_status(value: &Value) -> Result<DonationStatus, RegistryError> {
    value
        .as_str()
        .ok_or_else(|| RegistryError::Validation("donation_status must be a string".to_string()))?
        .parse::<DonationStatus>()
        .map_err(|e| RegistryError::Validation(e.to_string()))
}

fn strip_immutable(fields: &mut Document) {
    for field in IMMUTABLE_FIELDS {
        fields.remove(field);
    }
}
