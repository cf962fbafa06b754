use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::application::repos::{
    CategoriesRepo, CategoriesWriteRepo, CreateCategoryParams, RepoError, UpdateCategoryParams,
};
use crate::domain::entities::CategoryRecord;

use super::{PostgresRepositories, map_sqlx_error};

const COLUMNS: &str = "id, slug, name, description, sort_order, active, created_at, updated_at";

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_categories(&self, active_only: bool) -> Result<Vec<CategoryRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM categories WHERE 1=1 "));
        if active_only {
            qb.push(" AND active = TRUE ");
        }
        qb.push(" ORDER BY sort_order ASC, created_at ASC");

        qb.build_query_as::<CategoryRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
        sqlx::query_as::<_, CategoryRecord>(&format!(
            "SELECT {COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl CategoriesWriteRepo for PostgresRepositories {
    async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<CategoryRecord, RepoError> {
        sqlx::query_as::<_, CategoryRecord>(&format!(
            "INSERT INTO categories (slug, name, description, sort_order, active) \
             VALUES ($1, $2, $3, \
                 (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM categories), $4) \
             RETURNING {COLUMNS}"
        ))
        .bind(params.slug)
        .bind(params.name)
        .bind(params.description)
        .bind(params.active)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_category(
        &self,
        params: UpdateCategoryParams,
    ) -> Result<CategoryRecord, RepoError> {
        sqlx::query_as::<_, CategoryRecord>(&format!(
            "UPDATE categories \
             SET slug = $2, name = $3, description = $4, active = $5, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(params.id)
        .bind(params.slug)
        .bind(params.name)
        .bind(params.description)
        .bind(params.active)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn set_category_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<CategoryRecord, RepoError> {
        sqlx::query_as::<_, CategoryRecord>(&format!(
            "UPDATE categories SET active = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(active)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_categories(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError> {
        self.apply_ordering("categories", None, ordered_ids).await
    }
}
