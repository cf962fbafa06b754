//! Public JSON pages.
//!
//! Read endpoints render whatever the cached accessors return and never
//! fail; the two form submissions report structured errors.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::application::admin::careers::SubmitApplicationCommand;
use crate::application::admin::inbox::SubmitMessageCommand;
use crate::domain::entities::{ApplicationRecord, MessageRecord};

use super::AppState;
use super::error::ApiError;

pub async fn home(State(state): State<AppState>) -> Json<Value> {
    let categories = state.reads.active_categories().await;
    let statistics = state.reads.statistics().await;
    let testimonials = state.reads.published_testimonials().await;

    Json(json!({
        "categories": categories,
        "statistics": statistics,
        "testimonials": testimonials,
    }))
}

pub async fn products_index(State(state): State<AppState>) -> Json<Value> {
    let categories = state.reads.active_categories().await;
    Json(json!({ "categories": categories }))
}

pub async fn products_for_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Json<Value> {
    let categories = state.reads.active_categories().await;
    let category = categories.iter().find(|c| c.id == category_id);
    let products = state.reads.products_for_category(category_id).await;

    Json(json!({
        "category": category,
        "products": products,
    }))
}

pub async fn about(State(state): State<AppState>) -> Json<Value> {
    let statistics = state.reads.statistics().await;
    let testimonials = state.reads.published_testimonials().await;

    Json(json!({
        "statistics": statistics,
        "testimonials": testimonials,
    }))
}

pub async fn careers(State(state): State<AppState>) -> Json<Value> {
    let jobs = state.reads.open_jobs().await;
    Json(json!({ "jobs": jobs }))
}

#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<(StatusCode, Json<MessageRecord>), ApiError> {
    let record = state
        .inbox
        .submit(SubmitMessageCommand {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            body: payload.body,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct ApplyPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

pub async fn submit_application(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<ApplyPayload>,
) -> Result<(StatusCode, Json<ApplicationRecord>), ApiError> {
    let record = state
        .careers
        .submit_application(SubmitApplicationCommand {
            job_id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            cover_letter: payload.cover_letter,
            resume_url: payload.resume_url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}
