use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::application::repos::{
    CreateTestimonialParams, RepoError, TestimonialsRepo, TestimonialsWriteRepo,
    UpdateTestimonialParams,
};
use crate::domain::entities::TestimonialRecord;

use super::{PostgresRepositories, map_sqlx_error};

const COLUMNS: &str = "id, author, company, quote, sort_order, published, created_at, updated_at";

#[async_trait]
impl TestimonialsRepo for PostgresRepositories {
    async fn list_testimonials(
        &self,
        published_only: bool,
    ) -> Result<Vec<TestimonialRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM testimonials WHERE 1=1 "));
        if published_only {
            qb.push(" AND published = TRUE ");
        }
        qb.push(" ORDER BY sort_order ASC, created_at ASC");

        qb.build_query_as::<TestimonialRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TestimonialRecord>, RepoError> {
        sqlx::query_as::<_, TestimonialRecord>(&format!(
            "SELECT {COLUMNS} FROM testimonials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl TestimonialsWriteRepo for PostgresRepositories {
    async fn create_testimonial(
        &self,
        params: CreateTestimonialParams,
    ) -> Result<TestimonialRecord, RepoError> {
        sqlx::query_as::<_, TestimonialRecord>(&format!(
            "INSERT INTO testimonials (author, company, quote, sort_order, published) \
             VALUES ($1, $2, $3, \
                 (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM testimonials), $4) \
             RETURNING {COLUMNS}"
        ))
        .bind(params.author)
        .bind(params.company)
        .bind(params.quote)
        .bind(params.published)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_testimonial(
        &self,
        params: UpdateTestimonialParams,
    ) -> Result<TestimonialRecord, RepoError> {
        sqlx::query_as::<_, TestimonialRecord>(&format!(
            "UPDATE testimonials \
             SET author = $2, company = $3, quote = $4, published = $5, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(params.id)
        .bind(params.author)
        .bind(params.company)
        .bind(params.quote)
        .bind(params.published)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn set_testimonial_published(
        &self,
        id: Uuid,
        published: bool,
    ) -> Result<TestimonialRecord, RepoError> {
        sqlx::query_as::<_, TestimonialRecord>(&format!(
            "UPDATE testimonials SET published = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(published)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_testimonials(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError> {
        self.apply_ordering("testimonials", None, ordered_ids).await
    }
}
