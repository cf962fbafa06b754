use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{
    CreateTestimonialParams, RepoError, TestimonialsRepo, TestimonialsWriteRepo,
    UpdateTestimonialParams,
};
use crate::cache::{Revalidator, tags::ResourceKind};
use crate::domain::entities::TestimonialRecord;

use super::require;

#[derive(Debug, Error)]
pub enum AdminTestimonialError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error("testimonial not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CreateTestimonialCommand {
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    pub published: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateTestimonialCommand {
    pub id: Uuid,
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    pub published: bool,
}

#[derive(Clone)]
pub struct AdminTestimonialsService {
    reader: Arc<dyn TestimonialsRepo>,
    writer: Arc<dyn TestimonialsWriteRepo>,
    revalidator: Arc<Revalidator>,
}

impl AdminTestimonialsService {
    pub fn new(
        reader: Arc<dyn TestimonialsRepo>,
        writer: Arc<dyn TestimonialsWriteRepo>,
        revalidator: Arc<Revalidator>,
    ) -> Self {
        Self {
            reader,
            writer,
            revalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<TestimonialRecord>, AdminTestimonialError> {
        self.reader
            .list_testimonials(false)
            .await
            .map_err(AdminTestimonialError::from)
    }

    pub async fn find(&self, id: Uuid) -> Result<TestimonialRecord, AdminTestimonialError> {
        self.reader
            .find_by_id(id)
            .await?
            .ok_or(AdminTestimonialError::NotFound)
    }

    pub async fn create(
        &self,
        command: CreateTestimonialCommand,
    ) -> Result<TestimonialRecord, AdminTestimonialError> {
        let author = require("author", &command.author)
            .map_err(AdminTestimonialError::ConstraintViolation)?;
        let quote = require("quote", &command.quote)
            .map_err(AdminTestimonialError::ConstraintViolation)?;

        let record = self
            .writer
            .create_testimonial(CreateTestimonialParams {
                author,
                company: command.company,
                quote,
                published: command.published,
            })
            .await?;

        self.revalidator.revalidate(ResourceKind::Testimonials, None);
        Ok(record)
    }

    pub async fn update(
        &self,
        command: UpdateTestimonialCommand,
    ) -> Result<TestimonialRecord, AdminTestimonialError> {
        let author = require("author", &command.author)
            .map_err(AdminTestimonialError::ConstraintViolation)?;
        let quote = require("quote", &command.quote)
            .map_err(AdminTestimonialError::ConstraintViolation)?;

        let record = self
            .writer
            .update_testimonial(UpdateTestimonialParams {
                id: command.id,
                author,
                company: command.company,
                quote,
                published: command.published,
            })
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminTestimonialError::NotFound,
                other => AdminTestimonialError::Repo(other),
            })?;

        self.revalidator.revalidate(ResourceKind::Testimonials, None);
        Ok(record)
    }

    pub async fn set_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<TestimonialRecord, AdminTestimonialError> {
        let record = self
            .writer
            .set_testimonial_published(id, published)
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminTestimonialError::NotFound,
                other => AdminTestimonialError::Repo(other),
            })?;

        self.revalidator.revalidate(ResourceKind::Testimonials, None);
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AdminTestimonialError> {
        self.find(id).await?;
        self.writer.delete_testimonial(id).await?;
        self.revalidator.revalidate(ResourceKind::Testimonials, None);
        Ok(())
    }

    pub async fn reorder(&self, ordered_ids: &[Uuid]) -> Result<(), AdminTestimonialError> {
        if ordered_ids.is_empty() {
            return Err(AdminTestimonialError::ConstraintViolation("ordered_ids"));
        }
        self.writer.reorder_testimonials(ordered_ids).await?;
        self.revalidator.revalidate(ResourceKind::Testimonials, None);
        Ok(())
    }
}
