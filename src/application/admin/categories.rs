use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{
    CategoriesRepo, CategoriesWriteRepo, CreateCategoryParams, ProductsRepo, RepoError,
    UpdateCategoryParams,
};
use crate::cache::{Revalidator, tags::ResourceKind};
use crate::domain::entities::CategoryRecord;

use super::{require, require_slug};

#[derive(Debug, Error)]
pub enum AdminCategoryError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error("category still contains {count} products")]
    InUse { count: usize },
    #[error("category not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Clone)]
pub struct AdminCategoriesService {
    reader: Arc<dyn CategoriesRepo>,
    products: Arc<dyn ProductsRepo>,
    writer: Arc<dyn CategoriesWriteRepo>,
    revalidator: Arc<Revalidator>,
}

impl AdminCategoriesService {
    pub fn new(
        reader: Arc<dyn CategoriesRepo>,
        products: Arc<dyn ProductsRepo>,
        writer: Arc<dyn CategoriesWriteRepo>,
        revalidator: Arc<Revalidator>,
    ) -> Self {
        Self {
            reader,
            products,
            writer,
            revalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<CategoryRecord>, AdminCategoryError> {
        self.reader
            .list_categories(false)
            .await
            .map_err(AdminCategoryError::from)
    }

    pub async fn find(&self, id: Uuid) -> Result<CategoryRecord, AdminCategoryError> {
        self.reader
            .find_by_id(id)
            .await?
            .ok_or(AdminCategoryError::NotFound)
    }

    pub async fn create(
        &self,
        command: CreateCategoryCommand,
    ) -> Result<CategoryRecord, AdminCategoryError> {
        let name = require("name", &command.name)
            .map_err(AdminCategoryError::ConstraintViolation)?;
        let slug = require_slug(&command.slug).map_err(AdminCategoryError::ConstraintViolation)?;

        let record = self
            .writer
            .create_category(CreateCategoryParams {
                slug,
                name,
                description: command.description,
                active: command.active,
            })
            .await?;

        self.revalidator
            .revalidate(ResourceKind::Categories, Some(record.id));
        Ok(record)
    }

    pub async fn update(
        &self,
        command: UpdateCategoryCommand,
    ) -> Result<CategoryRecord, AdminCategoryError> {
        let name = require("name", &command.name)
            .map_err(AdminCategoryError::ConstraintViolation)?;
        let slug = require_slug(&command.slug).map_err(AdminCategoryError::ConstraintViolation)?;

        let record = self
            .writer
            .update_category(UpdateCategoryParams {
                id: command.id,
                slug,
                name,
                description: command.description,
                active: command.active,
            })
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminCategoryError::NotFound,
                other => AdminCategoryError::Repo(other),
            })?;

        self.revalidator
            .revalidate(ResourceKind::Categories, Some(record.id));
        Ok(record)
    }

    pub async fn set_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<CategoryRecord, AdminCategoryError> {
        let record = self
            .writer
            .set_category_active(id, active)
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminCategoryError::NotFound,
                other => AdminCategoryError::Repo(other),
            })?;

        self.revalidator
            .revalidate(ResourceKind::Categories, Some(record.id));
        Ok(record)
    }

    /// Delete an empty category. Categories that still hold products are
    /// refused rather than cascaded.
    pub async fn delete(&self, id: Uuid) -> Result<(), AdminCategoryError> {
        self.find(id).await?;

        let products = self.products.list_products(Some(id), false).await?;
        if !products.is_empty() {
            return Err(AdminCategoryError::InUse {
                count: products.len(),
            });
        }

        self.writer.delete_category(id).await?;
        self.revalidator
            .revalidate(ResourceKind::Categories, Some(id));
        Ok(())
    }

    pub async fn reorder(&self, ordered_ids: &[Uuid]) -> Result<(), AdminCategoryError> {
        if ordered_ids.is_empty() {
            return Err(AdminCategoryError::ConstraintViolation("ordered_ids"));
        }
        self.writer.reorder_categories(ordered_ids).await?;
        self.revalidator.revalidate(ResourceKind::Categories, None);
        Ok(())
    }
}
