//! CORS middleware configuration.

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Comma separated list of allowed origins; permissive when unset.
pub const CORS_ALLOWED_ORIGINS_VAR: &str = "CORS_ALLOWED_ORIGINS";

/// Create a CORS layer from `CORS_ALLOWED_ORIGINS`.
pub fn cors_layer_from_env() -> CorsLayer {
    match std::env::var(CORS_ALLOWED_ORIGINS_VAR) {
        Ok(origins) if !origins.trim().is_empty() => create_custom_cors_layer(&origins),
        _ => create_cors_layer(),
    }
}

/// Create a CORS layer with permissive settings for development.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Create a CORS layer restricted to a comma separated origin list.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn create_custom_cors_layer(allowed_origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
