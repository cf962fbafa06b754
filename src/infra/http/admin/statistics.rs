use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::statistics::UpdateStatisticCommand;
use crate::domain::entities::StatisticRecord;
use crate::infra::http::AppState;
use crate::infra::http::error::ApiError;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StatisticRecord>>, ApiError> {
    let rows = state.statistics.list().await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub label: String,
    pub value: i64,
    pub suffix: Option<String>,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayload>,
) -> Result<Json<StatisticRecord>, ApiError> {
    let record = state
        .statistics
        .update(UpdateStatisticCommand {
            id,
            label: payload.label,
            value: payload.value,
            suffix: payload.suffix,
        })
        .await?;
    Ok(Json(record))
}
