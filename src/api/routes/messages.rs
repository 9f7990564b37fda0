//! Charette message routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{Fields, Message};

pub fn messages_router() -> Router<AppState> {
    Router::new().route(
        "/charettes/{id}/messages",
        get(get_messages).post(add_message),
    )
}

/// Message listing filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct MessageQuery {
    /// Only return messages posted in this breakout room
    pub room_id: Option<String>,
}

/// GET /charettes/{id}/messages - Messages oldest first
#[utoipa::path(
    get,
    path = "/charettes/{id}/messages",
    tag = "Messages",
    params(
        ("id" = String, Path, description = "Charette id"),
        MessageQuery
    ),
    responses(
        (status = 200, description = "Messages retrieved", body = Vec<Object>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state
        .store()
        .get_messages(&id, query.room_id.as_deref())
        .await?;
    Ok(Json(messages))
}

/// POST /charettes/{id}/messages - Post a message
#[utoipa::path(
    post,
    path = "/charettes/{id}/messages",
    tag = "Messages",
    params(
        ("id" = String, Path, description = "Charette id")
    ),
    request_body = Object,
    responses(
        (status = 201, description = "Message stored", body = Object),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Fields>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = state.store().add_message(&id, fields).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
