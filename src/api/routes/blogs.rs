//! Blog routes - plain CRUD passthrough keyed by identifier.

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use serde_json::{Value, json};

use crate::storage::Document;

use super::app_state::AppState;
use super::error::ApiError;

/// Create the blogs router
pub fn blogs_router() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/{id}", axum::routing::patch(update_blog).delete(delete_blog))
}

/// GET /blogs
async fn list_blogs(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let records = state.blogs().list_all().await?;
    Ok(Json(json!(records)))
}

/// POST /blogs
async fn create_blog(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.blogs().create(payload).await?;
    Ok(Json(json!(result)))
}

/// PATCH /blogs/{id} - shallow merge (publish toggles, edits)
async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.blogs().update(&id, fields).await?;
    Ok(Json(json!(result)))
}

/// DELETE /blogs/{id}
async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = state.blogs().delete_by_id(&id).await?;
    Ok(Json(json!(result)))
}
