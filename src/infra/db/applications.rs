use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::application::repos::{ApplicationsRepo, NewApplicationParams, RepoError};
use crate::domain::entities::ApplicationRecord;
use crate::domain::types::ApplicationStatus;

use super::{PostgresRepositories, map_sqlx_error};

const COLUMNS: &str = "id, job_id, name, email, phone, cover_letter, resume_url, status, \
                       created_at, updated_at";

#[async_trait]
impl ApplicationsRepo for PostgresRepositories {
    async fn insert_application(
        &self,
        params: NewApplicationParams,
    ) -> Result<ApplicationRecord, RepoError> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            "INSERT INTO applications (job_id, name, email, phone, cover_letter, resume_url) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(params.job_id)
        .bind(params.name)
        .bind(params.email)
        .bind(params.phone)
        .bind(params.cover_letter)
        .bind(params.resume_url)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_applications(
        &self,
        job_id: Option<Uuid>,
    ) -> Result<Vec<ApplicationRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM applications WHERE 1=1 "));
        if let Some(job_id) = job_id {
            qb.push(" AND job_id = ");
            qb.push_bind(job_id);
        }
        qb.push(" ORDER BY created_at DESC");

        qb.build_query_as::<ApplicationRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, RepoError> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            "SELECT {COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepoError> {
        sqlx::query_as::<_, ApplicationRecord>(&format!(
            "UPDATE applications SET status = $2, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_application(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
