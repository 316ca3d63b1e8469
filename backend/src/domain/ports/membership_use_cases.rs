//! Driving port for community membership.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Membership, PageRequest};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of membership use cases.
    pub enum MembershipError {
        InvalidInput { message: String } => "invalid membership input: {message}" as InvalidRequest,
        CommunityNotFound => "community not found" as NotFound,
        NotMember => "membership not found" as NotFound,
        AlreadyMember => "already a member of this community" as Conflict,
        OwnerCannotLeave => "the owner cannot leave their community" as Conflict,
    }
}

/// Membership use cases.
#[async_trait]
pub trait MembershipUseCases: Send + Sync {
    async fn join_community(
        &self,
        community_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Membership, MembershipError>;

    async fn list_members(
        &self,
        community_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Membership>, MembershipError>;

    async fn leave_community(
        &self,
        community_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), MembershipError>;
}
