//! Space management service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::access::can_manage;
use crate::domain::ports::{
    CommunityRepository, MembershipRepository, SpaceError, SpaceRepository, SpaceUseCases,
};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{NewSpace, Space, SpaceChanges, parse_identifier, slugify};

const MAX_NAME_CHARS: usize = 80;
const MAX_DESCRIPTION_CHARS: usize = 1_000;

/// Space service implementing [`SpaceUseCases`].
pub struct SpaceService<C: ?Sized, S: ?Sized, M: ?Sized> {
    communities: Arc<C>,
    spaces: Arc<S>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<C: ?Sized, S: ?Sized, M: ?Sized> SpaceService<C, S, M> {
    pub fn new(
        communities: Arc<C>,
        spaces: Arc<S>,
        memberships: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            communities,
            spaces,
            memberships,
            clock,
        }
    }
}

fn validated_description(raw: Option<String>) -> Result<Option<String>, SpaceError> {
    let description = optional_text(raw);
    if description
        .as_ref()
        .is_some_and(|text| text.chars().count() > MAX_DESCRIPTION_CHARS)
    {
        return Err(SpaceError::invalid_input(format!(
            "description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(description)
}

impl<C, S, M> SpaceService<C, S, M>
where
    C: CommunityRepository + ?Sized,
    S: SpaceRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn existing_space(&self, id: &Uuid) -> Result<Space, SpaceError> {
        self.spaces
            .find_by_id(id)
            .await?
            .ok_or_else(SpaceError::not_found)
    }

    async fn ensure_manager(&self, community_id: &Uuid, actor_id: &Uuid) -> Result<(), SpaceError> {
        if can_manage(self.memberships.as_ref(), community_id, actor_id).await? {
            Ok(())
        } else {
            Err(SpaceError::not_permitted())
        }
    }

    async fn managed_space(&self, actor_id: &Uuid, id: &Uuid) -> Result<Space, SpaceError> {
        let space = self.existing_space(id).await?;
        self.ensure_manager(&space.community_id, actor_id).await?;
        Ok(space)
    }
}

#[async_trait]
impl<C, S, M> SpaceUseCases for SpaceService<C, S, M>
where
    C: CommunityRepository + ?Sized,
    S: SpaceRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn create_space(&self, actor_id: &Uuid, input: NewSpace) -> Result<Space, SpaceError> {
        let name = required_text("name", &input.name, MAX_NAME_CHARS)
            .map_err(SpaceError::invalid_input)?;
        let slug = slugify(&name)
            .ok_or_else(|| SpaceError::invalid_input("name must contain at least one letter or digit"))?;
        let description = validated_description(input.description)?;

        if self
            .communities
            .find_by_id(&input.community_id)
            .await?
            .is_none()
        {
            return Err(SpaceError::community_not_found());
        }
        self.ensure_manager(&input.community_id, actor_id).await?;
        let siblings = self.spaces.find_by_community_id(&input.community_id).await?;
        let position = u32::try_from(siblings.len()).unwrap_or(u32::MAX);

        let now = self.clock.utc();
        let space = Space {
            id: Uuid::new_v4(),
            community_id: input.community_id,
            name,
            slug,
            description,
            visibility: input.visibility,
            position,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        match self.spaces.create(&space).await {
            Ok(()) => Ok(space),
            Err(error) if error.is_duplicate() => Err(SpaceError::slug_taken(space.slug)),
            Err(error) => Err(error.into()),
        }
    }

    async fn get_space(&self, id: &str) -> Result<Space, SpaceError> {
        let id = parse_identifier(id).map_err(|error| SpaceError::invalid_input(error.to_string()))?;
        self.existing_space(&id).await
    }

    async fn list_spaces(&self, community_id: &Uuid) -> Result<Vec<Space>, SpaceError> {
        if self.communities.find_by_id(community_id).await?.is_none() {
            return Err(SpaceError::community_not_found());
        }
        Ok(self.spaces.find_by_community_id(community_id).await?)
    }

    async fn update_space(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: SpaceChanges,
    ) -> Result<Space, SpaceError> {
        let mut space = self.managed_space(actor_id, id).await?;

        if let Some(name) = changes.name {
            space.name = required_text("name", &name, MAX_NAME_CHARS)
                .map_err(SpaceError::invalid_input)?;
        }
        if changes.description.is_some() {
            space.description = validated_description(changes.description)?;
        }
        if let Some(visibility) = changes.visibility {
            space.visibility = visibility;
        }
        if let Some(position) = changes.position {
            space.position = position;
        }
        space.updated_at = self.clock.utc();

        self.spaces.update(&space).await?;
        Ok(space)
    }

    async fn delete_space(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), SpaceError> {
        self.managed_space(actor_id, id).await?;
        if self.spaces.delete(id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(SpaceError::not_found())
        }
    }
}

#[cfg(test)]
#[path = "space_service_tests.rs"]
mod tests;
