//! Driven port for channels.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Channel;

use super::RepositoryError;

/// Storage for channels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    async fn create(&self, channel: &Channel) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Channel>, RepositoryError>;

    /// Live channels of a space ordered by position.
    async fn find_by_space_id(&self, space_id: &Uuid) -> Result<Vec<Channel>, RepositoryError>;

    async fn update(&self, channel: &Channel) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
