use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::products::{CreateProductCommand, UpdateProductCommand};
use crate::domain::entities::ProductRecord;
use crate::infra::http::AppState;
use crate::infra::http::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category_id: Option<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    let rows = state.products.list(query.category_id).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct CreatePayload {
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePayload>,
) -> Result<(StatusCode, Json<ProductRecord>), ApiError> {
    let record = state
        .products
        .create(CreateProductCommand {
            category_id: payload.category_id,
            slug: payload.slug,
            name: payload.name,
            summary: payload.summary,
            description: payload.description,
            image_url: payload.image_url,
            active: payload.active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayload>,
) -> Result<Json<ProductRecord>, ApiError> {
    let record = state
        .products
        .update(UpdateProductCommand {
            id,
            category_id: payload.category_id,
            slug: payload.slug,
            name: payload.name,
            summary: payload.summary,
            description: payload.description,
            image_url: payload.image_url,
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
) -> Result<Json<ProductRecord>, ApiError> {
    let record = state.products.set_active(id, payload.active).await?;
    Ok(Json(record))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ReorderPayload {
    pub category_id: Uuid,
    pub ordered_ids: Vec<Uuid>,
}

pub async fn reorder(
    State(state): State<AppState>,
    Json(payload): Json<ReorderPayload>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .reorder(payload.category_id, &payload.ordered_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
