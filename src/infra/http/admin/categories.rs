use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::categories::{CreateCategoryCommand, UpdateCategoryCommand};
use crate::domain::entities::CategoryRecord;
use crate::infra::http::AppState;
use crate::infra::http::error::ApiError;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryRecord>>, ApiError> {
    let rows = state.categories.list().await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct CreatePayload {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePayload>,
) -> Result<(StatusCode, Json<CategoryRecord>), ApiError> {
    let record = state
        .categories
        .create(CreateCategoryCommand {
            slug: payload.slug,
            name: payload.name,
            description: payload.description,
            active: payload.active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayload>,
) -> Result<Json<CategoryRecord>, ApiError> {
    let record = state
        .categories
        .update(UpdateCategoryCommand {
            id,
            slug: payload.slug,
            name: payload.name,
            description: payload.description,
            active: payload.active,
        })
        .await?;
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct TogglePayload {
    pub active: bool,
}

pub async fn set_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TogglePayload>,
) -> Result<Json<CategoryRecord>, ApiError> {
    let record = state.categories.set_active(id, payload.active).await?;
    Ok(Json(record))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ReorderPayload {
    pub ordered_ids: Vec<Uuid>,
}

pub async fn reorder(
    State(state): State<AppState>,
    Json(payload): Json<ReorderPayload>,
) -> Result<StatusCode, ApiError> {
    state.categories.reorder(&payload.ordered_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
