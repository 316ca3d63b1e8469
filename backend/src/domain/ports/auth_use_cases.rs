//! Driving port for account sign-up and sign-in.

use async_trait::async_trait;

use crate::domain::User;

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of authentication use cases.
    pub enum AuthError {
        InvalidInput { message: String } => "invalid credentials input: {message}" as InvalidRequest,
        InvalidCredentials => "invalid email or password" as Unauthorized,
        EmailTaken => "an account with this email already exists" as Conflict,
    }
}

/// Input for registering an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Input for signing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

/// Authentication use cases.
#[async_trait]
pub trait AuthUseCases: Send + Sync {
    async fn sign_up(&self, input: SignUp) -> Result<User, AuthError>;

    async fn sign_in(&self, input: SignIn) -> Result<User, AuthError>;
}
