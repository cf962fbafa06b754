//! Headline statistics shown on the home and about pages.
//!
//! The set is seeded by migration; admins edit values in place but cannot
//! add or remove rows.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{
    RepoError, StatisticsRepo, StatisticsWriteRepo, UpdateStatisticParams,
};
use crate::cache::{Revalidator, tags::ResourceKind};
use crate::domain::entities::StatisticRecord;

use super::require;

#[derive(Debug, Error)]
pub enum AdminStatisticError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error("statistic not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct UpdateStatisticCommand {
    pub id: Uuid,
    pub label: String,
    pub value: i64,
    pub suffix: Option<String>,
}

#[derive(Clone)]
pub struct AdminStatisticsService {
    reader: Arc<dyn StatisticsRepo>,
    writer: Arc<dyn StatisticsWriteRepo>,
    revalidator: Arc<Revalidator>,
}

impl AdminStatisticsService {
    pub fn new(
        reader: Arc<dyn StatisticsRepo>,
        writer: Arc<dyn StatisticsWriteRepo>,
        revalidator: Arc<Revalidator>,
    ) -> Self {
        Self {
            reader,
            writer,
            revalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<StatisticRecord>, AdminStatisticError> {
        self.reader
            .list_statistics()
            .await
            .map_err(AdminStatisticError::from)
    }

    pub async fn update(
        &self,
        command: UpdateStatisticCommand,
    ) -> Result<StatisticRecord, AdminStatisticError> {
        let label = require("label", &command.label)
            .map_err(AdminStatisticError::ConstraintViolation)?;
        if command.value < 0 {
            return Err(AdminStatisticError::ConstraintViolation("value"));
        }

        let record = self
            .writer
            .update_statistic(UpdateStatisticParams {
                id: command.id,
                label,
                value: command.value,
                suffix: command.suffix,
            })
            .await
            .map_err(|error| match error {
                RepoError::NotFound => AdminStatisticError::NotFound,
                other => AdminStatisticError::Repo(other),
            })?;

        self.revalidator.revalidate(ResourceKind::Statistics, None);
        Ok(record)
    }
}
