use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::testimonials::{CreateTestimonialCommand, UpdateTestimonialCommand};
use crate::domain::entities::TestimonialRecord;
use crate::infra::http::AppState;
use crate::infra::http::error::ApiError;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TestimonialRecord>>, ApiError> {
    let rows = state.testimonials.list().await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct CreatePayload {
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    #[serde(default)]
    pub published: bool,
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePayload>,
) -> Result<(StatusCode, Json<TestimonialRecord>), ApiError> {
    let record = state
        .testimonials
        .create(CreateTestimonialCommand {
            author: payload.author,
            company: payload.company,
            quote: payload.quote,
            published: payload.published,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    pub published: bool,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayload>,
) -> Result<Json<TestimonialRecord>, ApiError> {
    let record = state
        .testimonials
        .update(UpdateTestimonialCommand {
            id,
            author: payload.author,
            company: payload.company,
            quote: payload.quote,
            published: payload.published,
        })
        .await?;
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct TogglePayload {
    pub published: bool,
}

pub async fn set_published(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TogglePayload>,
) -> Result<Json<TestimonialRecord>, ApiError> {
    let record = state
        .testimonials
        .set_published(id, payload.published)
        .await?;
    Ok(Json(record))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.testimonials.delete(id).await?;
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
    state.testimonials.reorder(&payload.ordered_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
