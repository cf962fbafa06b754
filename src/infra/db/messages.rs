use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{MessagesRepo, NewMessageParams, RepoError};
use crate::domain::entities::MessageRecord;

use super::{PostgresRepositories, map_sqlx_error};

const COLUMNS: &str = "id, name, email, subject, body, read, created_at";

#[async_trait]
impl MessagesRepo for PostgresRepositories {
    async fn insert_message(&self, params: NewMessageParams) -> Result<MessageRecord, RepoError> {
        sqlx::query_as::<_, MessageRecord>(&format!(
            "INSERT INTO messages (name, email, subject, body) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(params.name)
        .bind(params.email)
        .bind(params.subject)
        .bind(params.body)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_messages(&self) -> Result<Vec<MessageRecord>, RepoError> {
        sqlx::query_as::<_, MessageRecord>(&format!(
            "SELECT {COLUMNS} FROM messages ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MessageRecord>, RepoError> {
        sqlx::query_as::<_, MessageRecord>(&format!(
            "SELECT {COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn set_message_read(&self, id: Uuid, read: bool) -> Result<MessageRecord, RepoError> {
        sqlx::query_as::<_, MessageRecord>(&format!(
            "UPDATE messages SET read = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(read)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_message(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
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
