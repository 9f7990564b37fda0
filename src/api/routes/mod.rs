//! API routes module - organizes all route handlers.
//!
//! Charette routes are flat paths under `/charettes`; sub-collections hang
//! off `/charettes/{id}/...`.

pub mod analysis;
pub mod app_state;
pub mod charettes;
pub mod error;
pub mod messages;
pub mod openapi;
pub mod participants;
pub mod reports;

use axum::{Router, extract::State, response::Json, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

pub use app_state::AppState;
pub use error::ApiError;

use crate::services::StoreMode;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    /// Which backend the store settled on
    pub mode: StoreMode,
}

/// Create the main API router combining all route modules
///
/// State is applied by callers (`.with_state(app_state)`).
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(charettes::charettes_router())
        // OpenAPI documentation endpoints
        .merge(openapi::openapi_router())
}

/// GET /health - Liveness plus the store's operating mode
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        mode: state.store().mode(),
    })
}
