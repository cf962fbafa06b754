//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    ApplicationRecord, CategoryRecord, JobOpeningRecord, MessageRecord, ProductRecord,
    StatisticRecord, TestimonialRecord,
};
use crate::domain::types::{ApplicationStatus, EmploymentType};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_categories(&self, active_only: bool) -> Result<Vec<CategoryRecord>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryParams {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[async_trait]
pub trait CategoriesWriteRepo: Send + Sync {
    async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<CategoryRecord, RepoError>;

    async fn update_category(
        &self,
        params: UpdateCategoryParams,
    ) -> Result<CategoryRecord, RepoError>;

    async fn set_category_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<CategoryRecord, RepoError>;

    async fn delete_category(&self, id: Uuid) -> Result<(), RepoError>;

    /// Persist a full new ordering as one batch write.
    async fn reorder_categories(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ProductsRepo: Send + Sync {
    async fn list_products(
        &self,
        category_id: Option<Uuid>,
        active_only: bool,
    ) -> Result<Vec<ProductRecord>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreateProductParams {
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateProductParams {
    pub id: Uuid,
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
}

#[async_trait]
pub trait ProductsWriteRepo: Send + Sync {
    async fn create_product(
        &self,
        params: CreateProductParams,
    ) -> Result<ProductRecord, RepoError>;

    async fn update_product(
        &self,
        params: UpdateProductParams,
    ) -> Result<ProductRecord, RepoError>;

    async fn set_product_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<ProductRecord, RepoError>;

    async fn delete_product(&self, id: Uuid) -> Result<(), RepoError>;

    /// Persist a full new ordering for one category as one batch write.
    async fn reorder_products(
        &self,
        category_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> Result<(), RepoError>;
}

#[async_trait]
pub trait JobsRepo: Send + Sync {
    async fn list_jobs(&self, open_only: bool) -> Result<Vec<JobOpeningRecord>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobOpeningRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreateJobParams {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateJobParams {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    pub open: bool,
}

#[async_trait]
pub trait JobsWriteRepo: Send + Sync {
    async fn create_job(&self, params: CreateJobParams) -> Result<JobOpeningRecord, RepoError>;

    async fn update_job(&self, params: UpdateJobParams) -> Result<JobOpeningRecord, RepoError>;

    async fn set_job_open(&self, id: Uuid, open: bool) -> Result<JobOpeningRecord, RepoError>;

    async fn delete_job(&self, id: Uuid) -> Result<(), RepoError>;

    async fn reorder_jobs(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError>;
}

#[async_trait]
pub trait TestimonialsRepo: Send + Sync {
    async fn list_testimonials(
        &self,
        published_only: bool,
    ) -> Result<Vec<TestimonialRecord>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TestimonialRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreateTestimonialParams {
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    pub published: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateTestimonialParams {
    pub id: Uuid,
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    pub published: bool,
}

#[async_trait]
pub trait TestimonialsWriteRepo: Send + Sync {
    async fn create_testimonial(
        &self,
        params: CreateTestimonialParams,
    ) -> Result<TestimonialRecord, RepoError>;

    async fn update_testimonial(
        &self,
        params: UpdateTestimonialParams,
    ) -> Result<TestimonialRecord, RepoError>;

    async fn set_testimonial_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<TestimonialRecord, RepoError>;

    async fn delete_testimonial(&self, id: Uuid) -> Result<(), RepoError>;

    async fn reorder_testimonials(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError>;
}

#[async_trait]
pub trait StatisticsRepo: Send + Sync {
    async fn list_statistics(&self) -> Result<Vec<StatisticRecord>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StatisticRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct UpdateStatisticParams {
    pub id: Uuid,
    pub label: String,
    pub value: i64,
    pub suffix: Option<String>,
}

/// Statistics are a fixed seeded set: update only, no create or delete.
#[async_trait]
pub trait StatisticsWriteRepo: Send + Sync {
    async fn update_statistic(
        &self,
        params: UpdateStatisticParams,
    ) -> Result<StatisticRecord, RepoError>;
}

#[derive(Debug, Clone)]
pub struct NewMessageParams {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
}

#[async_trait]
pub trait MessagesRepo: Send + Sync {
    async fn insert_message(&self, params: NewMessageParams) -> Result<MessageRecord, RepoError>;
    async fn list_messages(&self) -> Result<Vec<MessageRecord>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MessageRecord>, RepoError>;
    async fn set_message_read(&self, id: Uuid, read: bool) -> Result<MessageRecord, RepoError>;
    async fn delete_message(&self, id: Uuid) -> Result<(), RepoError>;
}

#[derive(Debug, Clone)]
pub struct NewApplicationParams {
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

#[async_trait]
pub trait ApplicationsRepo: Send + Sync {
    async fn insert_application(
        &self,
        params: NewApplicationParams,
    ) -> Result<ApplicationRecord, RepoError>;
    async fn list_applications(
        &self,
        job_id: Option<Uuid>,
    ) -> Result<Vec<ApplicationRecord>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, RepoError>;
    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepoError>;
    async fn delete_application(&self, id: Uuid) -> Result<(), RepoError>;
}
