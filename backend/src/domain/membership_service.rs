//! Community membership service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    CommunityRepository, MembershipError, MembershipRepository, MembershipUseCases,
};
use crate::domain::{MemberRole, Membership, PageRequest};

/// Membership service implementing [`MembershipUseCases`].
pub struct MembershipService<C: ?Sized, M: ?Sized> {
    communities: Arc<C>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<C: ?Sized, M: ?Sized> MembershipService<C, M> {
    pub fn new(communities: Arc<C>, memberships: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            communities,
            memberships,
            clock,
        }
    }
}

impl<C, M> MembershipService<C, M>
where
    C: CommunityRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn ensure_community(&self, community_id: &Uuid) -> Result<(), MembershipError> {
        self.communities
            .find_by_id(community_id)
            .await?
            .map(|_| ())
            .ok_or_else(MembershipError::community_not_found)
    }
}

#[async_trait]
impl<C, M> MembershipUseCases for MembershipService<C, M>
where
    C: CommunityRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn join_community(
        &self,
        community_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Membership, MembershipError> {
        self.ensure_community(community_id).await?;
        let membership =
            Membership::new(*community_id, *user_id, MemberRole::Member, self.clock.utc());
        match self.memberships.create(&membership).await {
            Ok(()) => Ok(membership),
            Err(error) if error.is_duplicate() => Err(MembershipError::already_member()),
            Err(error) => Err(error.into()),
        }
    }

    async fn list_members(
        &self,
        community_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Membership>, MembershipError> {
        self.ensure_community(community_id).await?;
        Ok(self
            .memberships
            .find_by_community_id(community_id, page)
            .await?)
    }

    async fn leave_community(
        &self,
        community_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), MembershipError> {
        let membership = self
            .memberships
            .find(community_id, user_id)
            .await?
            .ok_or_else(MembershipError::not_member)?;
        if membership.role == MemberRole::Owner {
            return Err(MembershipError::owner_cannot_leave());
        }
        if self
            .memberships
            .delete(&membership.id, self.clock.utc())
            .await?
        {
            Ok(())
        } else {
            Err(MembershipError::not_member())
        }
    }
}

#[cfg(test)]
#[path = "membership_service_tests.rs"]
mod tests;
