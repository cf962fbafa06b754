use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::application::repos::{
    CreateJobParams, JobsRepo, JobsWriteRepo, RepoError, UpdateJobParams,
};
use crate::domain::entities::JobOpeningRecord;

use super::{PostgresRepositories, map_sqlx_error};

const COLUMNS: &str = "id, title, department, location, employment_type, description, \
                       sort_order, open, created_at, updated_at";

#[async_trait]
impl JobsRepo for PostgresRepositories {
    async fn list_jobs(&self, open_only: bool) -> Result<Vec<JobOpeningRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM job_openings WHERE 1=1 "));
        if open_only {
            qb.push(" AND open = TRUE ");
        }
        qb.push(" ORDER BY sort_order ASC, created_at ASC");

        qb.build_query_as::<JobOpeningRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobOpeningRecord>, RepoError> {
        sqlx::query_as::<_, JobOpeningRecord>(&format!(
            "SELECT {COLUMNS} FROM job_openings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl JobsWriteRepo for PostgresRepositories {
    async fn create_job(&self, params: CreateJobParams) -> Result<JobOpeningRecord, RepoError> {
        sqlx::query_as::<_, JobOpeningRecord>(&format!(
            "INSERT INTO job_openings \
             (title, department, location, employment_type, description, sort_order, open) \
             VALUES ($1, $2, $3, $4, $5, \
                 (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM job_openings), $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(params.title)
        .bind(params.department)
        .bind(params.location)
        .bind(params.employment_type)
        .bind(params.description)
        .bind(params.open)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_job(&self, params: UpdateJobParams) -> Result<JobOpeningRecord, RepoError> {
        sqlx::query_as::<_, JobOpeningRecord>(&format!(
            "UPDATE job_openings \
             SET title = $2, department = $3, location = $4, employment_type = $5, \
                 description = $6, open = $7, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(params.id)
        .bind(params.title)
        .bind(params.department)
        .bind(params.location)
        .bind(params.employment_type)
        .bind(params.description)
        .bind(params.open)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn set_job_open(&self, id: Uuid, open: bool) -> Result<JobOpeningRecord, RepoError> {
        sqlx::query_as::<_, JobOpeningRecord>(&format!(
            "UPDATE job_openings SET open = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(open)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_job(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM job_openings WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn reorder_jobs(&self, ordered_ids: &[Uuid]) -> Result<(), RepoError> {
        self.apply_ordering("job_openings", None, ordered_ids).await
    }
}
