//! API error handling utilities.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::RegistryError;
use crate::storage::StorageError;

/// API error response
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message,
            "status": self.status.as_u16(),
        });

        (self.status, axum::Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let status = match &err {
            StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
            StorageError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            StorageError::ConnectionError(_) => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Storage(e) => e.into(),
            RegistryError::Validation(message) => Self {
                status: StatusCode::BAD_REQUEST,
                message,
            },
        }
    }
}
