//! Contact messages: public submission plus the admin inbox.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{MessagesRepo, NewMessageParams, RepoError};
use crate::cache::{Revalidator, tags::ResourceKind};
use crate::domain::entities::MessageRecord;

use super::require;

#[derive(Debug, Error)]
pub enum InboxError {
    #[error("invalid field `{0}`")]
    ConstraintViolation(&'static str),
    #[error("message not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Clone)]
pub struct InboxService {
    messages: Arc<dyn MessagesRepo>,
    revalidator: Arc<Revalidator>,
}

impl InboxService {
    pub fn new(messages: Arc<dyn MessagesRepo>, revalidator: Arc<Revalidator>) -> Self {
        Self {
            messages,
            revalidator,
        }
    }

    /// Public contact form submission.
    pub async fn submit(&self, command: SubmitMessageCommand) -> Result<MessageRecord, InboxError> {
        let name = require("name", &command.name).map_err(InboxError::ConstraintViolation)?;
        let email = require("email", &command.email).map_err(InboxError::ConstraintViolation)?;
        if !email.contains('@') {
            return Err(InboxError::ConstraintViolation("email"));
        }
        let body = require("body", &command.body).map_err(InboxError::ConstraintViolation)?;

        let record = self
            .messages
            .insert_message(NewMessageParams {
                name,
                email,
                subject: command.subject,
                body,
            })
            .await?;

        self.revalidator.revalidate(ResourceKind::Messages, None);
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<MessageRecord>, InboxError> {
        self.messages.list_messages().await.map_err(InboxError::from)
    }

    pub async fn set_read(&self, id: Uuid, read: bool) -> Result<MessageRecord, InboxError> {
        let record = self
            .messages
            .set_message_read(id, read)
            .await
            .map_err(|error| match error {
                RepoError::NotFound => InboxError::NotFound,
                other => InboxError::Repo(other),
            })?;

        self.revalidator.revalidate(ResourceKind::Messages, None);
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), InboxError> {
        self.messages
            .find_by_id(id)
            .await?
            .ok_or(InboxError::NotFound)?;
        self.messages.delete_message(id).await?;
        self.revalidator.revalidate(ResourceKind::Messages, None);
        Ok(())
    }
}
