//! Credential and signature adapters.

mod argon2_password_hasher;
mod hmac_webhook_verifier;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use hmac_webhook_verifier::{HmacWebhookVerifier, SIGNATURE_PREFIX};
