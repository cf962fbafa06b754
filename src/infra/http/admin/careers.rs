use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::careers::{CreateJobCommand, UpdateJobCommand};
use crate::domain::entities::{ApplicationRecord, JobOpeningRecord};
use crate::domain::types::{ApplicationStatus, EmploymentType};
use crate::infra::http::AppState;
use crate::infra::http::error::ApiError;

pub async fn list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobOpeningRecord>>, ApiError> {
    let rows = state.careers.list_jobs().await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct CreateJobPayload {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_open() -> bool {
    true
}

pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<(StatusCode, Json<JobOpeningRecord>), ApiError> {
    let record = state
        .careers
        .create_job(CreateJobCommand {
            title: payload.title,
            department: payload.department,
            location: payload.location,
            employment_type: payload.employment_type,
            description: payload.description,
            open: payload.open,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobPayload {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    pub open: bool,
}

pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<Json<JobOpeningRecord>, ApiError> {
    let record = state
        .careers
        .update_job(UpdateJobCommand {
            id,
            title: payload.title,
            department: payload.department,
            location: payload.location,
            employment_type: payload.employment_type,
            description: payload.description,
            open: payload.open,
        })
        .await?;
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct ToggleJobPayload {
    pub open: bool,
}

pub async fn set_job_open(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleJobPayload>,
) -> Result<Json<JobOpeningRecord>, ApiError> {
    let record = state.careers.set_job_open(id, payload.open).await?;
    Ok(Json(record))
}

pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.careers.delete_job(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ReorderJobsPayload {
    pub ordered_ids: Vec<Uuid>,
}

pub async fn reorder_jobs(
    State(state): State<AppState>,
    Json(payload): Json<ReorderJobsPayload>,
) -> Result<StatusCode, ApiError> {
    state.careers.reorder_jobs(&payload.ordered_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ApplicationsQuery {
    pub job_id: Option<Uuid>,
}

pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationsQuery>,
) -> Result<Json<Vec<ApplicationRecord>>, ApiError> {
    let rows = state.careers.list_applications(query.job_id).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct ApplicationStatusPayload {
    pub status: ApplicationStatus,
}

pub async fn set_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApplicationStatusPayload>,
) -> Result<Json<ApplicationRecord>, ApiError> {
    let record = state
        .careers
        .update_application_status(id, payload.status)
        .await?;
    Ok(Json(record))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.careers.delete_application(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
