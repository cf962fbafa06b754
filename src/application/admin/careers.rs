//! Job openings and the applications they receive.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{
    ApplicationsRepo, CreateJobParams, JobsRepo, JobsWriteRepo, NewApplicationParams, RepoError,
    UpdateJobParams,
};
use crate::cache::{Revalidator, tags::ResourceKind};
use crate::domain::entities::{ApplicationRecord, JobOpeningRecord};
use crate::domain::types::{ApplicationStatus, EmploymentType};

use super::require;

#[derive(Debug, Error)]
pub enum AdminCareersError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error("job opening not found")]
    JobNotFound,
    #[error("application not found")]
    ApplicationNotFound,
    #[error("job opening is closed")]
    JobClosed,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CreateJobCommand {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateJobCommand {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct SubmitApplicationCommand {
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Clone)]
pub struct CareersService {
    jobs: Arc<dyn JobsRepo>,
    jobs_writer: Arc<dyn JobsWriteRepo>,
    applications: Arc<dyn ApplicationsRepo>,
    revalidator: Arc<Revalidator>,
}

impl CareersService {
    pub fn new(
        jobs: Arc<dyn JobsRepo>,
        jobs_writer: Arc<dyn JobsWriteRepo>,
        applications: Arc<dyn ApplicationsRepo>,
        revalidator: Arc<Revalidator>,
    ) -> Self {
        Self {
            jobs,
            jobs_writer,
            applications,
            revalidator,
        }
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobOpeningRecord>, AdminCareersError> {
        self.jobs
            .list_jobs(false)
            .await
            .map_err(AdminCareersError::from)
    }

    pub async fn find_job(&self, id: Uuid) -> Result<JobOpeningRecord, AdminCareersError> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or(AdminCareersError::JobNotFound)
    }

    pub async fn create_job(
        &self,
        command: CreateJobCommand,
    ) -> Result<JobOpeningRecord, AdminCareersError> {
        let title = require("title", &command.title)
            .map_err(AdminCareersError::ConstraintViolation)?;
        let department = require("department", &command.department)
            .map_err(AdminCareersError::ConstraintViolation)?;
        let location = require("location", &command.location)
            .map_err(AdminCareersError::ConstraintViolation)?;

        let record = self
            .jobs_writer
            .create_job(CreateJobParams {
                title,
                department,
                location,
                employment_type: command.employment_type,
                description: command.description,
                open: command.open,
            })
            .await?;

        self.revalidator.revalidate(ResourceKind::Jobs, None);
        Ok(record)
    }

    pub async fn update_job(
        &self,
        command: UpdateJobCommand,
    ) -> Result<JobOpeningRecord, AdminCareersError> {
        let title = require("title", &command.title)
            .map_err(AdminCareersError::ConstraintViolation)?;
        let department = require("department", &command.department)
            .map_err(AdminCareersError::ConstraintViolation)?;
        let location = require("location", &command.location)
            .map_err(AdminCareersError::ConstraintViolation)?;

        let record = self
            .jobs_writer
            .update_job(UpdateJobParams {
                id: command.id,
                title,
                department,
                location,
                employment_type: command.employment_type,
                description: command.description,
                open: command.open,
            })
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminCareersError::JobNotFound,
                other => AdminCareersError::Repo(other),
            })?;

        self.revalidator.revalidate(ResourceKind::Jobs, None);
        Ok(record)
    }

    pub async fn set_job_open(
        &self,
        id: Uuid,
        open: bool,
    ) -> Result<JobOpeningRecord, AdminCareersError> {
        let record = self
            .jobs_writer
            .set_job_open(id, open)
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminCareersError::JobNotFound,
                other => AdminCareersError::Repo(other),
            })?;

        self.revalidator.revalidate(ResourceKind::Jobs, None);
        Ok(record)
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<(), AdminCareersError> {
        self.find_job(id).await?;
        self.jobs_writer.delete_job(id).await?;
        self.revalidator.revalidate(ResourceKind::Jobs, None);
        Ok(())
    }

    pub async fn reorder_jobs(&self, ordered_ids: &[Uuid]) -> Result<(), AdminCareersError> {
        if ordered_ids.is_empty() {
            return Err(AdminCareersError::ConstraintViolation("ordered_ids"));
        }
        self.jobs_writer.reorder_jobs(ordered_ids).await?;
        self.revalidator.revalidate(ResourceKind::Jobs, None);
        Ok(())
    }

    /// Public careers form: file an application against an open job.
    pub async fn submit_application(
        &self,
        command: SubmitApplicationCommand,
    ) -> Result<ApplicationRecord, AdminCareersError> {
        let name = require("name", &command.name)
            .map_err(AdminCareersError::ConstraintViolation)?;
        let email = require("email", &command.email)
            .map_err(AdminCareersError::ConstraintViolation)?;
        if !email.contains('@') {
            return Err(AdminCareersError::ConstraintViolation("email"));
        }

        let job = self.find_job(command.job_id).await?;
        if !job.open {
            return Err(AdminCareersError::JobClosed);
        }

        let record = self
            .applications
            .insert_application(NewApplicationParams {
                job_id: job.id,
                name,
                email,
                phone: command.phone,
                cover_letter: command.cover_letter,
                resume_url: command.resume_url,
            })
            .await?;

        self.revalidator.revalidate(ResourceKind::Applications, None);
        Ok(record)
    }

    pub async fn list_applications(
        &self,
        job_id: Option<Uuid>,
    ) -> Result<Vec<ApplicationRecord>, AdminCareersError> {
        self.applications
            .list_applications(job_id)
            .await
            .map_err(AdminCareersError::from)
    }

    pub async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, AdminCareersError> {
        let record = self
            .applications
            .update_application_status(id, status)
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminCareersError::ApplicationNotFound,
                other => AdminCareersError::Repo(other),
            })?;

        self.revalidator.revalidate(ResourceKind::Applications, None);
        Ok(record)
    }

    pub async fn delete_application(&self, id: Uuid) -> Result<(), AdminCareersError> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or(AdminCareersError::ApplicationNotFound)?;
        self.applications.delete_application(id).await?;
        self.revalidator.revalidate(ResourceKind::Applications, None);
        Ok(())
    }
}
