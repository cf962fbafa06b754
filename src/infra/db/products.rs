use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::application::repos::{
    CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError, UpdateProductParams,
};
use crate::domain::entities::ProductRecord;

use super::{PostgresRepositories, map_sqlx_error};

const COLUMNS: &str = "id, category_id, slug, name, summary, description, image_url, \
                       sort_order, active, created_at, updated_at";

#[async_trait]
impl ProductsRepo for PostgresRepositories {
    async fn list_products(
        &self,
        category_id: Option<Uuid>,
        active_only: bool,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM products WHERE 1=1 "));
        if let Some(category_id) = category_id {
            qb.push(" AND category_id = ");
            qb.push_bind(category_id);
        }
        if active_only {
            qb.push(" AND active = TRUE ");
        }
        qb.push(" ORDER BY sort_order ASC, created_at ASC");

        qb.build_query_as::<ProductRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>, RepoError> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ProductsWriteRepo for PostgresRepositories {
    async fn create_product(
        &self,
        params: CreateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            "INSERT INTO products \
             (category_id, slug, name, summary, description, image_url, sort_order, active) \
             VALUES ($1, $2, $3, $4, $5, $6, \
                 (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM products WHERE category_id = $1), \
                 $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(params.category_id)
        .bind(params.slug)
        .bind(params.name)
        .bind(params.summary)
        .bind(params.description)
        .bind(params.image_url)
        .bind(params.active)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_product(
        &self,
        params: UpdateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            "UPDATE products \
             SET category_id = $2, slug = $3, name = $4, summary = $5, description = $6, \
                 image_url = $7, active = $8, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(params.id)
        .bind(params.category_id)
        .bind(params.slug)
        .bind(params.name)
        .bind(params.summary)
        .bind(params.description)
        .bind(params.image_url)
        .bind(params.active)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn set_product_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<ProductRecord, RepoError> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            "UPDATE products SET active = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(active)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_products(
        &self,
        category_id: Uuid,
        ordered_ids: &[Uuid],
    ) -> Result<(), RepoError> {
        self.apply_ordering("products", Some(("category_id", category_id)), ordered_ids)
            .await
    }
}
