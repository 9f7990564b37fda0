//! Charette routes.
//!
//! Top-level charette documents. Sub-collection routes live in sibling
//! modules and are merged in by [`charettes_router`].

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};

use super::app_state::AppState;
use super::error::ApiError;
use super::{analysis, messages, participants, reports};
use crate::models::{Charette, CharettePatch, Fields};

/// Create the charettes router, including every sub-collection route
pub fn charettes_router() -> Router<AppState> {
    Router::new()
        .route("/charettes", get(list_charettes).post(create_charette))
        .route("/charettes/{id}", get(get_charette).patch(update_charette))
        .merge(messages::messages_router())
        .merge(participants::participants_router())
        .merge(analysis::analysis_router())
        .merge(reports::reports_router())
}

/// GET /charettes - List every charette
#[utoipa::path(
    get,
    path = "/charettes",
    tag = "Charettes",
    responses(
        (status = 200, description = "Charettes retrieved", body = Vec<Object>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_charettes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Charette>>, ApiError> {
    Ok(Json(state.store().list_charettes().await?))
}

/// POST /charettes - Create a charette from an arbitrary JSON object
#[utoipa::path(
    post,
    path = "/charettes",
    tag = "Charettes",
    request_body = Object,
    responses(
        (status = 201, description = "Charette created", body = Object),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_charette(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> Result<(StatusCode, Json<Charette>), ApiError> {
    let charette = state.store().create_charette(fields).await?;
    Ok((StatusCode::CREATED, Json(charette)))
}

/// GET /charettes/{id} - Get a single charette
#[utoipa::path(
    get,
    path = "/charettes/{id}",
    tag = "Charettes",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    responses(
        (status = 200, description = "Charette retrieved", body = Object),
        (status = 404, description = "Charette not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_charette(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Charette>, ApiError> {
    state
        .store()
        .get_charette(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("charette", &id))
}

/// PATCH /charettes/{id} - Merge fields into a charette
#[utoipa::path(
    patch,
    path = "/charettes/{id}",
    tag = "Charettes",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    request_body = Object,
    responses(
        (status = 204, description = "Charette updated"),
        (status = 400, description = "Patch touches a store-managed field"),
        (status = 404, description = "Charette not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_charette(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CharettePatch>,
) -> Result<StatusCode, ApiError> {
    state.store().update_charette(&id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}
