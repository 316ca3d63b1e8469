//! Driving port for user profiles.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ProfileChanges, User};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of user use cases.
    pub enum UserError {
        InvalidInput { message: String } => "invalid user input: {message}" as InvalidRequest,
        NotFound => "user not found" as NotFound,
    }
}

/// User profile use cases.
#[async_trait]
pub trait UserUseCases: Send + Sync {
    /// Fetch a user by textual id. Blank ids are rejected before any lookup.
    async fn get_user(&self, id: &str) -> Result<User, UserError>;

    async fn update_profile(
        &self,
        user_id: &Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserError>;

    async fn delete_account(&self, user_id: &Uuid) -> Result<(), UserError>;
}
