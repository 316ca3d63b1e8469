//! Course completion certificates.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const VERIFICATION_CODE_LEN: usize = 16;

/// Proof that a user completed a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub verification_code: String,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    /// Issue a certificate at `issued_at`.
    pub fn issue(course_id: Uuid, user_id: Uuid, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id,
            user_id,
            verification_code: verification_code(&course_id, &user_id, issued_at),
            issued_at,
        }
    }
}

/// Public code printed on a certificate.
///
/// The first sixteen upper-case hex characters of
/// `SHA-256(course_id ‖ user_id ‖ issued_at)`.
pub fn verification_code(course_id: &Uuid, user_id: &Uuid, issued_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(course_id.as_bytes());
    hasher.update(user_id.as_bytes());
    hasher.update(issued_at.to_rfc3339().as_bytes());
    let mut code = hex::encode_upper(hasher.finalize());
    code.truncate(VERIFICATION_CODE_LEN);
    code
}
