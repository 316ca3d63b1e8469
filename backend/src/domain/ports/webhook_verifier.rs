//! Driven port for authenticating payment provider callbacks.

/// Checks that a webhook body was signed by the payment provider.
#[cfg_attr(test, mockall::automock)]
pub trait WebhookVerifier: Send + Sync {
    /// Whether `signature` is valid for the raw `payload`.
    fn verify(&self, payload: &[u8], signature: &str) -> bool;
}
