//! User profile service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{UserError, UserRepository, UserUseCases};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{ProfileChanges, User, parse_identifier};

pub(crate) const MAX_DISPLAY_NAME_CHARS: usize = 80;
const MAX_BIO_CHARS: usize = 500;

/// User service implementing [`UserUseCases`].
pub struct UserService<U: ?Sized> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized> UserService<U> {
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl<U> UserUseCases for UserService<U>
where
    U: UserRepository + ?Sized,
{
    async fn get_user(&self, id: &str) -> Result<User, UserError> {
        let id = parse_identifier(id).map_err(|error| UserError::invalid_input(error.to_string()))?;
        self.users
            .find_by_id(&id)
            .await?
            .ok_or_else(UserError::not_found)
    }

    async fn update_profile(
        &self,
        user_id: &Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(UserError::not_found)?;

        if let Some(name) = changes.display_name {
            user.display_name = required_text("displayName", &name, MAX_DISPLAY_NAME_CHARS)
                .map_err(UserError::invalid_input)?;
        }
        if changes.avatar_url.is_some() {
            user.avatar_url = optional_text(changes.avatar_url);
        }
        if changes.bio.is_some() {
            let bio = optional_text(changes.bio);
            if bio.as_ref().is_some_and(|bio| bio.chars().count() > MAX_BIO_CHARS) {
                return Err(UserError::invalid_input(format!(
                    "bio must be at most {MAX_BIO_CHARS} characters"
                )));
            }
            user.bio = bio;
        }
        user.updated_at = self.clock.utc();

        self.users.update(&user).await?;
        Ok(user)
    }

    async fn delete_account(&self, user_id: &Uuid) -> Result<(), UserError> {
        if self.users.delete(user_id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(UserError::not_found())
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
