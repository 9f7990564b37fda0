//! Charette participant routes.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{Fields, Participant};

pub fn participants_router() -> Router<AppState> {
    Router::new().route(
        "/charettes/{id}/participants",
        get(get_participants).post(add_participant),
    )
}

/// GET /charettes/{id}/participants - List participants
#[utoipa::path(
    get,
    path = "/charettes/{id}/participants",
    tag = "Participants",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    responses(
        (status = 200, description = "Participants retrieved", body = Vec<Object>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_participants(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    Ok(Json(state.store().get_participants(&id).await?))
}

/// POST /charettes/{id}/participants - Record a participant joining
#[utoipa::path(
    post,
    path = "/charettes/{id}/participants",
    tag = "Participants",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    request_body = Object,
    responses(
        (status = 201, description = "Participant stored", body = Object),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Fields>,
) -> Result<(StatusCode, Json<Participant>), ApiError> {
    let participant = state.store().add_participant(&id, fields).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}
