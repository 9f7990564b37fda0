//! Charette report routes.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{Fields, Report};

pub fn reports_router() -> Router<AppState> {
    Router::new()
        .route(
            "/charettes/{id}/reports",
            get(get_reports).post(store_report),
        )
        .route("/charettes/{id}/reports/latest", get(get_latest_report))
}

/// GET /charettes/{id}/reports - Reports, newest first
#[utoipa::path(
    get,
    path = "/charettes/{id}/reports",
    tag = "Reports",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    responses(
        (status = 200, description = "Reports retrieved", body = Vec<Object>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_reports(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(state.store().get_reports(&id).await?))
}

/// GET /charettes/{id}/reports/latest - The most recently generated report
#[utoipa::path(
    get,
    path = "/charettes/{id}/reports/latest",
    tag = "Reports",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    responses(
        (status = 200, description = "Latest report retrieved", body = Object),
        (status = 404, description = "No report generated yet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_latest_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    state
        .store()
        .get_latest_report(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("report for charette", &id))
}

/// POST /charettes/{id}/reports - Store a generated report
#[utoipa::path(
    post,
    path = "/charettes/{id}/reports",
    tag = "Reports",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    request_body = Object,
    responses(
        (status = 201, description = "Report stored", body = Object),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn store_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Fields>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let report = state.store().store_report(&id, fields).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
