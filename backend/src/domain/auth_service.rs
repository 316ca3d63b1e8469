//! Account registration and sign-in.
//!
//! Unknown emails and wrong passwords are reported identically so callers
//! cannot probe which accounts exist.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    AuthError, AuthUseCases, CredentialError, PasswordHasher, SignIn, SignUp, UserRepository,
};
use crate::domain::text::required_text;
use crate::domain::user_service::MAX_DISPLAY_NAME_CHARS;
use crate::domain::{User, normalize_email};

const MIN_PASSWORD_CHARS: usize = 8;
const MAX_PASSWORD_CHARS: usize = 128;
const MAX_EMAIL_CHARS: usize = 254;

/// Authentication service implementing [`AuthUseCases`].
pub struct AuthService<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized, H: ?Sized> AuthService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

fn validated_email(raw: &str) -> Result<String, AuthError> {
    let email = normalize_email(raw);
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed || email.chars().count() > MAX_EMAIL_CHARS {
        return Err(AuthError::invalid_input("email must be a valid address"));
    }
    Ok(email)
}

fn validated_password(password: &str) -> Result<(), AuthError> {
    let length = password.chars().count();
    if !(MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&length) {
        return Err(AuthError::invalid_input(format!(
            "password must be between {MIN_PASSWORD_CHARS} and {MAX_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

fn credential_failure(error: CredentialError) -> AuthError {
    tracing::error!(%error, "credential adapter failure");
    AuthError::internal(error.to_string())
}

#[async_trait]
impl<U, H> AuthUseCases for AuthService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn sign_up(&self, input: SignUp) -> Result<User, AuthError> {
        let email = validated_email(&input.email)?;
        validated_password(&input.password)?;
        let display_name = required_text("displayName", &input.display_name, MAX_DISPLAY_NAME_CHARS)
            .map_err(AuthError::invalid_input)?;
        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(credential_failure)?;

        let now = self.clock.utc();
        let user = User {
            id: Uuid::new_v4(),
            email,
            display_name,
            avatar_url: None,
            bio: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        match self.users.create(&user, &password_hash).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "account registered");
                Ok(user)
            }
            Err(error) if error.is_duplicate() => Err(AuthError::email_taken()),
            Err(error) => Err(error.into()),
        }
    }

    async fn sign_in(&self, input: SignIn) -> Result<User, AuthError> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(AuthError::invalid_input("email and password are required"));
        }
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::invalid_credentials());
        };
        let Some(stored_hash) = self.users.find_password_hash(&user.id).await? else {
            return Err(AuthError::invalid_credentials());
        };
        if self
            .hasher
            .verify(&input.password, &stored_hash)
            .map_err(credential_failure)?
        {
            Ok(user)
        } else {
            Err(AuthError::invalid_credentials())
        }
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
