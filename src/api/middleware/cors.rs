//! CORS middleware configuration.

use tower_http::cors::{AllowOrigin, CorsLayer};

/// Create a CORS layer from the `ALLOWED_ORIGINS` environment variable
/// (comma-separated origin list). Unset or empty means permissive, for
/// development.
pub fn create_cors_layer() -> CorsLayer {
    match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.trim().is_empty() => {
            let parsed = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect::<Vec<_>>();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
        _ => CorsLayer::permissive(),
    }
}
