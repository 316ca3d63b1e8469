//! HMAC-SHA256 implementation of the `WebhookVerifier` port.
//!
//! The provider signs the raw request body with a shared secret and sends
//! `sha256=<lowercase hex>` in the `X-Commons-Signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::WebhookVerifier;

type HmacSha256 = Hmac<Sha256>;

/// Scheme prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies payment webhooks against a shared secret.
pub struct HmacWebhookVerifier {
    secret: Zeroizing<Vec<u8>>,
}

impl HmacWebhookVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
        }
    }

    /// Signature header value for `payload`, as the provider would send it.
    pub fn sign(&self, payload: &[u8]) -> String {
        match HmacSha256::new_from_slice(&self.secret) {
            Ok(mut mac) => {
                mac.update(payload);
                format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
            }
            Err(_) => String::new(),
        }
    }
}

impl std::fmt::Debug for HmacWebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacWebhookVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl WebhookVerifier for HmacWebhookVerifier {
    fn verify(&self, payload: &[u8], signature: &str) -> bool {
        let Some(encoded) = signature.trim().strip_prefix(SIGNATURE_PREFIX) else {
            return false;
        };
        let Ok(expected) = hex::decode(encoded) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.secret) else {
            return false;
        };
        mac.update(payload);
        mac.verify_slice(&expected).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BODY: &[u8] = br#"{"checkoutId":"00000000-0000-0000-0000-000000000001","status":"completed"}"#;

    #[rstest]
    fn own_signatures_verify() {
        let verifier = HmacWebhookVerifier::new("whsec_test");
        let signature = verifier.sign(BODY);
        assert!(signature.starts_with(SIGNATURE_PREFIX));
        assert!(verifier.verify(BODY, &signature));
    }

    #[rstest]
    #[case("")]
    #[case("sha256=")]
    #[case("sha256=zz")]
    #[case("md5=00ff")]
    fn malformed_signatures_are_rejected(#[case] signature: &str) {
        let verifier = HmacWebhookVerifier::new("whsec_test");
        assert!(!verifier.verify(BODY, signature));
    }

    #[rstest]
    fn tampered_bodies_are_rejected() {
        let verifier = HmacWebhookVerifier::new("whsec_test");
        let signature = verifier.sign(BODY);
        assert!(!verifier.verify(b"{}", &signature));
    }

    #[rstest]
    fn other_secrets_are_rejected() {
        let signature = HmacWebhookVerifier::new("whsec_other").sign(BODY);
        assert!(!HmacWebhookVerifier::new("whsec_test").verify(BODY, &signature));
    }
}
