//! Driving port for spaces.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewSpace, Space, SpaceChanges};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of space use cases.
    pub enum SpaceError {
        InvalidInput { message: String } => "invalid space input: {message}" as InvalidRequest,
        NotFound => "space not found" as NotFound,
        CommunityNotFound => "community not found" as NotFound,
        SlugTaken { slug: String } => "space slug '{slug}' is already in use" as Conflict,
        NotPermitted => "only community owners and admins may manage spaces" as Forbidden,
    }
}

/// Space use cases.
#[async_trait]
pub trait SpaceUseCases: Send + Sync {
    /// Add a space; the actor must manage the community.
    async fn create_space(&self, actor_id: &Uuid, input: NewSpace) -> Result<Space, SpaceError>;

    async fn get_space(&self, id: &str) -> Result<Space, SpaceError>;

    async fn list_spaces(&self, community_id: &Uuid) -> Result<Vec<Space>, SpaceError>;

    async fn update_space(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: SpaceChanges,
    ) -> Result<Space, SpaceError>;

    async fn delete_space(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), SpaceError>;
}
