//! Charette analysis routes.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{AnalysisResult, Fields};

pub fn analysis_router() -> Router<AppState> {
    Router::new().route(
        "/charettes/{id}/analysis",
        get(get_analysis).post(store_analysis),
    )
}

/// GET /charettes/{id}/analysis - Analysis results, most recent first
#[utoipa::path(
    get,
    path = "/charettes/{id}/analysis",
    tag = "Analysis",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    responses(
        (status = 200, description = "Analysis results retrieved", body = Vec<Object>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AnalysisResult>>, ApiError> {
    Ok(Json(state.store().get_analysis(&id).await?))
}

/// POST /charettes/{id}/analysis - Store an analysis result
#[utoipa::path(
    post,
    path = "/charettes/{id}/analysis",
    tag = "Analysis",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    request_body = Object,
    responses(
        (status = 201, description = "Analysis result stored", body = Object),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn store_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Fields>,
) -> Result<(StatusCode, Json<AnalysisResult>), ApiError> {
    let result = state.store().store_analysis(&id, fields).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
