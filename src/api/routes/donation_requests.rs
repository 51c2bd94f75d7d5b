//! Donation request routes.
//!
//! Response bodies are the raw store acknowledgement or record(s), no
//! envelope, matching the surface the coordination frontend consumes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::services::donation_registry::RECENT_LIMIT;
use crate::storage::Document;

use super::app_state::AppState;
use super::error::ApiError;

/// Query parameters for GET /donation-requests/{email}
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    status: Option<String>,
}

/// Create the donation requests router
pub fn donation_requests_router() -> Router<AppState> {
    // In axum 0.8, path parameters use curly braces {} instead of colons :
    Router::new()
        .route(
            "/donation-requests",
            get(list_donation_requests).post(create_donation_request),
        )
        .route(
            "/donation-requests/{key}",
            get(donation_requests_by_owner)
                .patch(update_donation_request)
                .delete(delete_donation_request),
        )
        .route("/recent-requests/{email}", get(recent_donation_requests))
        .route("/donation-requests-field/{id}", get(donation_request_by_id))
        .route(
            "/donation-requests-status/{id}",
            axum::routing::patch(update_donation_status),
        )
}

/// GET /donation-requests - all requests, store order
async fn list_donation_requests(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let records = state.donation_requests().list_all().await?;
    Ok(Json(json!(records)))
}

/// POST /donation-requests - insert a fully-formed payload
async fn create_donation_request(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.donation_requests().create(payload).await?;
    info!(id = %result.inserted_id, "donation request created");
    Ok(Json(json!(result)))
}

/// GET /donation-requests/{email}?status= - owner's requests, optionally
/// restricted to a status. Always responds, empty list included.
async fn donation_requests_by_owner(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Value>, ApiError> {
    let records = state
        .donation_requests()
        .find_by_owner(&email, query.status.as_deref())
        .await?;
    Ok(Json(json!(records)))
}

/// GET /recent-requests/{email} - owner's three most recent requests
async fn recent_donation_requests(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let records = state
        .donation_requests()
        .recent_by_owner(&email, RECENT_LIMIT)
        .await?;
    Ok(Json(json!(records)))
}

/// GET /donation-requests-field/{id} - single request by identifier
async fn donation_request_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let record = state.donation_requests().get_by_id(&id).await?;
    Ok(Json(Value::Object(record)))
}

/// PATCH /donation-requests/{id} - shallow merge update
async fn update_donation_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.donation_requests().update(&id, fields).await?;
    Ok(Json(json!(result)))
}

/// PATCH /donation-requests-status/{id} - status-validating merge update
async fn update_donation_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.donation_requests().update_status(&id, fields).await?;
    Ok(Json(json!(result)))
}

/// DELETE /donation-requests/{id} - idempotent delete
async fn delete_donation_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = state.donation_requests().delete_by_id(&id).await?;
    info!(%id, deleted = result.deleted_count, "donation request delete");
    Ok(Json(json!(result)))
}
