//! JSON error responses for the HTTP surface.
//!
//! Clients get a stable code and a short message; the full error chain rides
//! the response extensions as an [`ErrorReport`] for the logging middleware.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::application::admin::careers::AdminCareersError;
use crate::application::admin::categories::AdminCategoryError;
use crate::application::admin::inbox::InboxError;
use crate::application::admin::products::AdminProductError;
use crate::application::admin::statistics::AdminStatisticError;
use crate::application::admin::testimonials::AdminTestimonialError;
use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    report: ErrorReport,
}

impl ApiError {
    pub fn new(
        source: &'static str,
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let report = ErrorReport::from_message(source, status, message.clone());
        Self {
            status,
            code,
            message,
            report,
        }
    }

    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
        error: &dyn std::error::Error,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            code,
            message: message.into(),
            report,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        let mut response = (self.status, body).into_response();
        self.report.attach(&mut response);
        response
    }
}

fn repo_error(source: &'static str, err: RepoError) -> ApiError {
    match &err {
        RepoError::Duplicate { constraint } => ApiError::from_error(
            source,
            StatusCode::CONFLICT,
            "duplicate",
            format!("a record with the same `{constraint}` already exists"),
            &err,
        ),
        RepoError::NotFound => ApiError::from_error(
            source,
            StatusCode::NOT_FOUND,
            "not_found",
            "resource not found",
            &err,
        ),
        RepoError::InvalidInput { .. } => ApiError::from_error(
            source,
            StatusCode::BAD_REQUEST,
            "invalid_input",
            "request could not be processed",
            &err,
        ),
        RepoError::Integrity { .. } => ApiError::from_error(
            source,
            StatusCode::CONFLICT,
            "integrity",
            "request conflicts with existing data",
            &err,
        ),
        RepoError::Timeout => ApiError::from_error(
            source,
            StatusCode::SERVICE_UNAVAILABLE,
            "timeout",
            "database timeout",
            &err,
        ),
        RepoError::Persistence(_) => ApiError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "persistence",
            "internal error",
            &err,
        ),
    }
}

impl From<AdminProductError> for ApiError {
    fn from(err: AdminProductError) -> Self {
        const SOURCE: &str = "infra::http::admin::products";
        match err {
            AdminProductError::ConstraintViolation(field) => ApiError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "validation",
                format!("invalid field `{field}`"),
            ),
            AdminProductError::UnknownCategory => ApiError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "unknown_category",
                "category not found",
            ),
            AdminProductError::NotFound => ApiError::new(
                SOURCE,
                StatusCode::NOT_FOUND,
                "not_found",
                "product not found",
            ),
            AdminProductError::Repo(err) => repo_error(SOURCE, err),
        }
    }
}

impl From<AdminCategoryError> for ApiError {
    fn from(err: AdminCategoryError) -> Self {
        const SOURCE: &str = "infra::http::admin::categories";
        match err {
            AdminCategoryError::ConstraintViolation(field) => ApiError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "validation",
                format!("invalid field `{field}`"),
            ),
            AdminCategoryError::InUse { count } => ApiError::new(
                SOURCE,
                StatusCode::CONFLICT,
                "in_use",
                format!("category still contains {count} products"),
            ),
            AdminCategoryError::NotFound => ApiError::new(
                SOURCE,
                StatusCode::NOT_FOUND,
                "not_found",
                "category not found",
            ),
            AdminCategoryError::Repo(err) => repo_error(SOURCE, err),
        }
    }
}

impl From<AdminCareersError> for ApiError {
    fn from(err: AdminCareersError) -> Self {
        const SOURCE: &str = "infra::http::admin::careers";
        match err {
            AdminCareersError::ConstraintViolation(field) => ApiError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "validation",
                format!("invalid field `{field}`"),
            ),
            AdminCareersError::JobNotFound => ApiError::new(
                SOURCE,
                StatusCode::NOT_FOUND,
                "not_found",
                "job opening not found",
            ),
            AdminCareersError::ApplicationNotFound => ApiError::new(
                SOURCE,
                StatusCode::NOT_FOUND,
                "not_found",
                "application not found",
            ),
            AdminCareersError::JobClosed => ApiError::new(
                SOURCE,
                StatusCode::CONFLICT,
                "job_closed",
                "job opening is closed",
            ),
            AdminCareersError::Repo(err) => repo_error(SOURCE, err),
        }
    }
}

impl From<AdminTestimonialError> for ApiError {
    fn from(err: AdminTestimonialError) -> Self {
        const SOURCE: &str = "infra::http::admin::testimonials";
        match err {
            AdminTestimonialError::ConstraintViolation(field) => ApiError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "validation",
                format!("invalid field `{field}`"),
            ),
            AdminTestimonialError::NotFound => ApiError::new(
                SOURCE,
                StatusCode::NOT_FOUND,
                "not_found",
                "testimonial not found",
            ),
            AdminTestimonialError::Repo(err) => repo_error(SOURCE, err),
        }
    }
}

impl From<AdminStatisticError> for ApiError {
    fn from(err: AdminStatisticError) -> Self {
        const SOURCE: &str = "infra::http::admin::statistics";
        match err {
            AdminStatisticError::ConstraintViolation(field) => ApiError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "validation",
                format!("invalid field `{field}`"),
            ),
            AdminStatisticError::NotFound => ApiError::new(
                SOURCE,
                StatusCode::NOT_FOUND,
                "not_found",
                "statistic not found",
            ),
            AdminStatisticError::Repo(err) => repo_error(SOURCE, err),
        }
    }
}

impl From<InboxError> for ApiError {
    fn from(err: InboxError) -> Self {
        const SOURCE: &str = "infra::http::admin::inbox";
        match err {
            InboxError::ConstraintViolation(field) => ApiError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "validation",
                format!("invalid field `{field}`"),
            ),
            InboxError::NotFound => ApiError::new(
                SOURCE,
                StatusCode::NOT_FOUND,
                "not_found",
                "message not found",
            ),
            InboxError::Repo(err) => repo_error(SOURCE, err),
        }
    }
}
