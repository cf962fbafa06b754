//! Postgres-backed repository implementations.

mod applications;
mod categories;
mod jobs;
mod messages;
mod products;
mod statistics;
mod testimonials;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use sqlx::{
    Postgres, Transaction,
    postgres::{PgPool, PgPoolOptions},
    query,
};
use uuid::Uuid;

use crate::application::repos::RepoError;

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn begin(&self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(self.pool()).await.map(|_| ())
    }

    /// Apply a full ordering as one transaction: row N gets sort position N.
    ///
    /// `scope` constrains every update to one partition column value, which
    /// makes a submission containing a foreign id fail the rows_affected
    /// check instead of silently renumbering another partition's row.
    async fn apply_ordering(
        &self,
        table: &'static str,
        scope: Option<(&'static str, Uuid)>,
        ordered_ids: &[Uuid],
    ) -> Result<(), RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        for (position, id) in ordered_ids.iter().enumerate() {
            let sql = match scope {
                Some((column, _)) => format!(
                    "UPDATE {table} SET sort_order = $1, updated_at = now() \
                     WHERE id = $2 AND {column} = $3"
                ),
                None => format!(
                    "UPDATE {table} SET sort_order = $1, updated_at = now() WHERE id = $2"
                ),
            };

            let mut update = sqlx::query(&sql)
                .bind(position as i32)
                .bind(id);
            if let Some((_, scope_id)) = scope {
                update = update.bind(scope_id);
            }

            let result = update.execute(&mut *tx).await.map_err(map_sqlx_error)?;
            if result.rows_affected() != 1 {
                return Err(RepoError::Integrity {
                    message: format!("ordering for `{table}` references unknown row {id}"),
                });
            }
        }

        tx.commit().await.map_err(map_sqlx_error)
    }
}
