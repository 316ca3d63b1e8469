//! Channel management service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::access::can_manage;
use crate::domain::ports::{
    ChannelError, ChannelRepository, ChannelUseCases, MembershipRepository, SpaceRepository,
};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{Channel, ChannelChanges, NewChannel, parse_identifier};

const MAX_NAME_CHARS: usize = 80;

/// Channel service implementing [`ChannelUseCases`].
pub struct ChannelService<S: ?Sized, Ch: ?Sized, M: ?Sized> {
    spaces: Arc<S>,
    channels: Arc<Ch>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<S: ?Sized, Ch: ?Sized, M: ?Sized> ChannelService<S, Ch, M> {
    pub fn new(
        spaces: Arc<S>,
        channels: Arc<Ch>,
        memberships: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            spaces,
            channels,
            memberships,
            clock,
        }
    }
}

fn validated_name(raw: &str) -> Result<String, ChannelError> {
    required_text("name", raw, MAX_NAME_CHARS).map_err(ChannelError::invalid_input)
}

impl<S, Ch, M> ChannelService<S, Ch, M>
where
    S: SpaceRepository + ?Sized,
    Ch: ChannelRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn ensure_manager(
        &self,
        community_id: &Uuid,
        actor_id: &Uuid,
    ) -> Result<(), ChannelError> {
        if can_manage(self.memberships.as_ref(), community_id, actor_id).await? {
            Ok(())
        } else {
            Err(ChannelError::not_permitted())
        }
    }

    async fn managed_channel(&self, actor_id: &Uuid, id: &Uuid) -> Result<Channel, ChannelError> {
        let channel = self
            .channels
            .find_by_id(id)
            .await?
            .ok_or_else(ChannelError::not_found)?;
        self.ensure_manager(&channel.community_id, actor_id).await?;
        Ok(channel)
    }
}

#[async_trait]
impl<S, Ch, M> ChannelUseCases for ChannelService<S, Ch, M>
where
    S: SpaceRepository + ?Sized,
    Ch: ChannelRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn create_channel(
        &self,
        actor_id: &Uuid,
        input: NewChannel,
    ) -> Result<Channel, ChannelError> {
        let name = validated_name(&input.name)?;
        let space = self
            .spaces
            .find_by_id(&input.space_id)
            .await?
            .ok_or_else(ChannelError::space_not_found)?;
        self.ensure_manager(&space.community_id, actor_id).await?;
        let siblings = self.channels.find_by_space_id(&space.id).await?;

        let now = self.clock.utc();
        let channel = Channel {
            id: Uuid::new_v4(),
            space_id: space.id,
            community_id: space.community_id,
            name,
            description: optional_text(input.description),
            kind: input.kind,
            position: u32::try_from(siblings.len()).unwrap_or(u32::MAX),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.channels.create(&channel).await?;
        Ok(channel)
    }

    async fn get_channel(&self, id: &str) -> Result<Channel, ChannelError> {
        let id =
            parse_identifier(id).map_err(|error| ChannelError::invalid_input(error.to_string()))?;
        self.channels
            .find_by_id(&id)
            .await?
            .ok_or_else(ChannelError::not_found)
    }

    async fn list_channels(&self, space_id: &Uuid) -> Result<Vec<Channel>, ChannelError> {
        if self.spaces.find_by_id(space_id).await?.is_none() {
            return Err(ChannelError::space_not_found());
        }
        Ok(self.channels.find_by_space_id(space_id).await?)
    }

    async fn update_channel(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: ChannelChanges,
    ) -> Result<Channel, ChannelError> {
        let mut channel = self.managed_channel(actor_id, id).await?;

        if let Some(name) = changes.name {
            channel.name = validated_name(&name)?;
        }
        if changes.description.is_some() {
            channel.description = optional_text(changes.description);
        }
        if let Some(kind) = changes.kind {
            channel.kind = kind;
        }
        if let Some(position) = changes.position {
            channel.position = position;
        }
        channel.updated_at = self.clock.utc();

        self.channels.update(&channel).await?;
        Ok(channel)
    }

    async fn delete_channel(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), ChannelError> {
        self.managed_channel(actor_id, id).await?;
        if self.channels.delete(id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(ChannelError::not_found())
        }
    }
}

#[cfg(test)]
#[path = "channel_service_tests.rs"]
mod tests;
