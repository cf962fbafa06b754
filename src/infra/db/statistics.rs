use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{
    RepoError, StatisticsRepo, StatisticsWriteRepo, UpdateStatisticParams,
};
use crate::domain::entities::StatisticRecord;

use super::{PostgresRepositories, map_sqlx_error};

const COLUMNS: &str = "id, label, value, suffix, sort_order, updated_at";

#[async_trait]
impl StatisticsRepo for PostgresRepositories {
    async fn list_statistics(&self) -> Result<Vec<StatisticRecord>, RepoError> {
        sqlx::query_as::<_, StatisticRecord>(&format!(
            "SELECT {COLUMNS} FROM statistics ORDER BY sort_order ASC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StatisticRecord>, RepoError> {
        sqlx::query_as::<_, StatisticRecord>(&format!(
            "SELECT {COLUMNS} FROM statistics WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl StatisticsWriteRepo for PostgresRepositories {
    async fn update_statistic(
        &self,
        params: UpdateStatisticParams,
    ) -> Result<StatisticRecord, RepoError> {
        sqlx::query_as::<_, StatisticRecord>(&format!(
            "UPDATE statistics \
             SET label = $2, value = $3, suffix = $4, updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(params.id)
        .bind(params.label)
        .bind(params.value)
        .bind(params.suffix)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
