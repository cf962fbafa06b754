use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{
    CategoriesRepo, CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError,
    UpdateProductParams,
};
use crate::cache::{Revalidator, tags::ResourceKind};
use crate::domain::entities::ProductRecord;

use super::{require, require_slug};

#[derive(Debug, Error)]
pub enum AdminProductError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error("category not found")]
    UnknownCategory,
    #[error("product not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: Uuid,
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
}

#[derive(Clone)]
pub struct AdminProductsService {
    reader: Arc<dyn ProductsRepo>,
    categories: Arc<dyn CategoriesRepo>,
    writer: Arc<dyn ProductsWriteRepo>,
    revalidator: Arc<Revalidator>,
}

impl AdminProductsService {
    pub fn new(
        reader: Arc<dyn ProductsRepo>,
        categories: Arc<dyn CategoriesRepo>,
        writer: Arc<dyn ProductsWriteRepo>,
        revalidator: Arc<Revalidator>,
    ) -> Self {
        Self {
            reader,
            categories,
            writer,
            revalidator,
        }
    }

    pub async fn list(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<ProductRecord>, AdminProductError> {
        self.reader
            .list_products(category_id, false)
            .await
            .map_err(AdminProductError::from)
    }

    pub async fn find(&self, id: Uuid) -> Result<ProductRecord, AdminProductError> {
        self.reader
            .find_by_id(id)
            .await?
            .ok_or(AdminProductError::NotFound)
    }

    pub async fn create(
        &self,
        command: CreateProductCommand,
    ) -> Result<ProductRecord, AdminProductError> {
        let name = require("name", &command.name)
            .map_err(AdminProductError::ConstraintViolation)?;
        let summary = require("summary", &command.summary)
            .map_err(AdminProductError::ConstraintViolation)?;
        let slug = require_slug(&command.slug).map_err(AdminProductError::ConstraintViolation)?;

        if self.categories.find_by_id(command.category_id).await?.is_none() {
            return Err(AdminProductError::UnknownCategory);
        }

        let record = self
            .writer
            .create_product(CreateProductParams {
                category_id: command.category_id,
                slug,
                name,
                summary,
                description: command.description,
                image_url: command.image_url,
                active: command.active,
            })
            .await?;

        self.revalidator
            .revalidate(ResourceKind::Products, Some(record.category_id));
        Ok(record)
    }

    pub async fn update(
        &self,
        command: UpdateProductCommand,
    ) -> Result<ProductRecord, AdminProductError> {
        let name = require("name", &command.name)
            .map_err(AdminProductError::ConstraintViolation)?;
        let summary = require("summary", &command.summary)
            .map_err(AdminProductError::ConstraintViolation)?;
        let slug = require_slug(&command.slug).map_err(AdminProductError::ConstraintViolation)?;

        // Moving a product between categories must refresh both listings.
        let previous = self.find(command.id).await?;

        if self.categories.find_by_id(command.category_id).await?.is_none() {
            return Err(AdminProductError::UnknownCategory);
        }

        let record = self
            .writer
            .update_product(UpdateProductParams {
                id: command.id,
                category_id: command.category_id,
                slug,
                name,
                summary,
                description: command.description,
                image_url: command.image_url,
                active: command.active,
            })
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminProductError::NotFound,
                other => AdminProductError::Repo(other),
            })?;

        self.revalidator
            .revalidate(ResourceKind::Products, Some(record.category_id));
        if previous.category_id != record.category_id {
            self.revalidator
                .revalidate(ResourceKind::Products, Some(previous.category_id));
        }
        Ok(record)
    }

    pub async fn set_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<ProductRecord, AdminProductError> {
        let record = self
            .writer
            .set_product_active(id, active)
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminProductError::NotFound,
                other => AdminProductError::Repo(other),
            })?;

        self.revalidator
            .revalidate(ResourceKind::Products, Some(record.category_id));
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AdminProductError> {
        let record = self.find(id).await?;
        self.writer.delete_product(id).await?;
        self.revalidator
            .revalidate(ResourceKind::Products, Some(record.category_id));
        Ok(())
    }

    /// Persist a full new ordering for one category.
    pub async fn reorder(
        &self,
        category_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> Result<(), AdminProductError> {
        if ordered_ids.is_empty() {
            return Err(AdminProductError::ConstraintViolation("ordered_ids"));
        }
        self.writer.reorder_products(category_id, ordered_ids).await?;
        self.revalidator
            .revalidate(ResourceKind::Products, Some(category_id));
        Ok(())
    }
}
