//! Community management service.
//!
//! Creating a community also enrols its creator as the owning member, so the
//! owner shows up in member listings from the start.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    CommunityError, CommunityRepository, CommunityUseCases, MembershipRepository,
    RepositoryError,
};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{
    Community, CommunityChanges, MemberRole, Membership, NewCommunity, is_hex_color,
    parse_identifier, slugify,
};

const MAX_NAME_CHARS: usize = 100;

/// Community service implementing [`CommunityUseCases`].
pub struct CommunityService<C: ?Sized, M: ?Sized> {
    communities: Arc<C>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<C: ?Sized, M: ?Sized> CommunityService<C, M> {
    /// Create a new service with the given repositories.
    pub fn new(communities: Arc<C>, memberships: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            communities,
            memberships,
            clock,
        }
    }
}

fn validated_name(raw: &str) -> Result<String, CommunityError> {
    required_text("name", raw, MAX_NAME_CHARS).map_err(CommunityError::invalid_input)
}

fn validated_color(raw: Option<String>) -> Result<Option<String>, CommunityError> {
    match optional_text(raw) {
        Some(color) if !is_hex_color(&color) => Err(CommunityError::invalid_input(
            "primaryColor must look like #rrggbb",
        )),
        other => Ok(other),
    }
}

fn duplicate_as_slug_taken(error: RepositoryError, slug: &str) -> CommunityError {
    if error.is_duplicate() {
        CommunityError::slug_taken(slug)
    } else {
        error.into()
    }
}

impl<C, M> CommunityService<C, M>
where
    C: CommunityRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn owned_community(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
    ) -> Result<Community, CommunityError> {
        let community = self
            .communities
            .find_by_id(id)
            .await?
            .ok_or_else(CommunityError::not_found)?;
        if !community.is_owned_by(actor_id) {
            return Err(CommunityError::not_owner());
        }
        Ok(community)
    }
}

#[async_trait]
impl<C, M> CommunityUseCases for CommunityService<C, M>
where
    C: CommunityRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn create_community(
        &self,
        owner_id: &Uuid,
        input: NewCommunity,
    ) -> Result<Community, CommunityError> {
        let name = validated_name(&input.name)?;
        let slug = slugify(&name).ok_or_else(|| {
            CommunityError::invalid_input("name must contain at least one letter or digit")
        })?;
        let primary_color = validated_color(input.primary_color)?;
        let now = self.clock.utc();

        let community = Community {
            id: Uuid::new_v4(),
            name,
            slug,
            logo_url: optional_text(input.logo_url),
            primary_color,
            owner_id: *owner_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.communities
            .create(&community)
            .await
            .map_err(|error| duplicate_as_slug_taken(error, &community.slug))?;

        let owner = Membership::new(community.id, *owner_id, MemberRole::Owner, now);
        self.memberships.create(&owner).await?;
        Ok(community)
    }

    async fn get_community(&self, id: &str) -> Result<Community, CommunityError> {
        let id = parse_identifier(id)
            .map_err(|error| CommunityError::invalid_input(error.to_string()))?;
        self.communities
            .find_by_id(&id)
            .await?
            .ok_or_else(CommunityError::not_found)
    }

    async fn update_community(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: CommunityChanges,
    ) -> Result<Community, CommunityError> {
        let mut community = self.owned_community(actor_id, id).await?;

        // The slug is fixed at creation so links keep working after a rename.
        if let Some(name) = changes.name {
            community.name = validated_name(&name)?;
        }
        if changes.logo_url.is_some() {
            community.logo_url = optional_text(changes.logo_url);
        }
        if changes.primary_color.is_some() {
            community.primary_color = validated_color(changes.primary_color)?;
        }
        community.updated_at = self.clock.utc();

        self.communities.update(&community).await?;
        Ok(community)
    }

    async fn delete_community(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), CommunityError> {
        self.owned_community(actor_id, id).await?;
        if self.communities.delete(id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(CommunityError::not_found())
        }
    }
}

#[cfg(test)]
#[path = "community_service_tests.rs"]
mod tests;
