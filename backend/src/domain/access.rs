//! Community role lookups shared by services that gate writes on membership.

use uuid::Uuid;

use crate::domain::MemberRole;
use crate::domain::ports::{MembershipRepository, RepositoryError};

async fn role_in<M>(
    memberships: &M,
    community_id: &Uuid,
    user_id: &Uuid,
) -> Result<Option<MemberRole>, RepositoryError>
where
    M: MembershipRepository + ?Sized,
{
    Ok(memberships
        .find(community_id, user_id)
        .await?
        .map(|membership| membership.role))
}

/// Whether `user_id` is an owner or admin of `community_id`.
pub(crate) async fn can_manage<M>(
    memberships: &M,
    community_id: &Uuid,
    user_id: &Uuid,
) -> Result<bool, RepositoryError>
where
    M: MembershipRepository + ?Sized,
{
    Ok(role_in(memberships, community_id, user_id)
        .await?
        .is_some_and(MemberRole::can_manage))
}

/// Whether `user_id` moderates `community_id`.
pub(crate) async fn can_moderate<M>(
    memberships: &M,
    community_id: &Uuid,
    user_id: &Uuid,
) -> Result<bool, RepositoryError>
where
    M: MembershipRepository + ?Sized,
{
    Ok(role_in(memberships, community_id, user_id)
        .await?
        .is_some_and(MemberRole::can_moderate))
}
