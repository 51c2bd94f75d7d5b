//! API routes module - organizes all route handlers.

pub mod app_state;
pub mod blogs;
pub mod donation_requests;
pub mod error;
pub mod users;

use axum::Router;

pub use app_state::AppState;

/// Create the main API router combining all route modules.
///
/// Paths are flat at the root, matching the surface the coordination
/// frontend consumes. State is applied by callers (e.g. TestServer);
/// for production use, call `.with_state(app_state)` after creating it.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(donation_requests::donation_requests_router())
        .merge(users::users_router())
        .merge(blogs::blogs_router())
}

/// Create the application state over the in-memory store backend.
pub fn create_app_state() -> AppState {
    AppState::new()
}
