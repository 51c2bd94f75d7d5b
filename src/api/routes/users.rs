//! User routes - plain CRUD passthrough keyed by email.

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
};
use serde_json::{Value, json};

use crate::storage::Document;

use super::app_state::AppState;
use super::error::ApiError;

/// Create the users router
pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{email}", get(user_by_email))
        .route("/users-update-status/{email}", patch(update_user))
        .route("/users-update-role/{email}", patch(update_user))
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.users().create(payload).await?;
    Ok(Json(json!(result)))
}

/// GET /users
async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let records = state.users().list_all().await?;
    Ok(Json(json!(records)))
}

/// GET /users/{email} - null body when absent, matching the lookup the
/// frontend performs for not-yet-registered users.
async fn user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let record = state.users().get_by_email(&email).await?;
    Ok(Json(record.map(Value::Object).unwrap_or(Value::Null)))
}

/// PATCH /users-update-status/{email} and /users-update-role/{email} -
/// both are shallow merges into the user document.
async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(fields): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.users().update_by_email(&email, fields).await?;
    Ok(Json(json!(result)))
}
