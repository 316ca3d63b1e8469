//! Driving port for community management.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Community, CommunityChanges, NewCommunity};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of community use cases.
    pub enum CommunityError {
        InvalidInput { message: String } => "invalid community input: {message}" as InvalidRequest,
        NotFound => "community not found" as NotFound,
        NotOwner => "only the community owner may do this" as Forbidden,
        SlugTaken { slug: String } => "community slug '{slug}' is already in use" as Conflict,
    }
}

/// Community use cases invoked by inbound adapters.
#[async_trait]
pub trait CommunityUseCases: Send + Sync {
    /// Create a community owned by `owner_id` and enrol the owner.
    async fn create_community(
        &self,
        owner_id: &Uuid,
        input: NewCommunity,
    ) -> Result<Community, CommunityError>;

    /// Fetch a community by textual id.
    async fn get_community(&self, id: &str) -> Result<Community, CommunityError>;

    /// Apply changes on behalf of the owner.
    async fn update_community(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: CommunityChanges,
    ) -> Result<Community, CommunityError>;

    /// Soft delete on behalf of the owner.
    async fn delete_community(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), CommunityError>;
}
