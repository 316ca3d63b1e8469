//! Driving port for channels.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Channel, ChannelChanges, NewChannel};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of channel use cases.
    pub enum ChannelError {
        InvalidInput { message: String } => "invalid channel input: {message}" as InvalidRequest,
        NotFound => "channel not found" as NotFound,
        SpaceNotFound => "space not found" as NotFound,
        NotPermitted => "only community owners and admins may manage channels" as Forbidden,
    }
}

/// Channel use cases.
#[async_trait]
pub trait ChannelUseCases: Send + Sync {
    /// Add a channel; the actor must manage the space's community.
    async fn create_channel(
        &self,
        actor_id: &Uuid,
        input: NewChannel,
    ) -> Result<Channel, ChannelError>;

    async fn get_channel(&self, id: &str) -> Result<Channel, ChannelError>;

    async fn list_channels(&self, space_id: &Uuid) -> Result<Vec<Channel>, ChannelError>;

    async fn update_channel(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: ChannelChanges,
    ) -> Result<Channel, ChannelError>;

    async fn delete_channel(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), ChannelError>;
}
