use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::MessageRecord;
use crate::infra::http::AppState;
use crate::infra::http::error::ApiError;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MessageRecord>>, ApiError> {
    let rows = state.inbox.list().await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct ReadPayload {
    pub read: bool,
}

pub async fn set_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReadPayload>,
) -> Result<Json<MessageRecord>, ApiError> {
    let record = state.inbox.set_read(id, payload.read).await?;
    Ok(Json(record))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.inbox.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
