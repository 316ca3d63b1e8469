//! Community aggregate: the tenant every other record belongs to.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A tenant with its own members, spaces, courses, and payment tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Community {
    /// Whether `user_id` owns this community.
    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.owner_id == *user_id
    }
}

/// Input for creating a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommunity {
    pub name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

/// Partial update of a community; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityChanges {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

/// Return `true` for `#rrggbb` colours (either case).
///
/// # Examples
/// ```
/// use commons::domain::is_hex_color;
///
/// assert!(is_hex_color("#1A2b3C"));
/// assert!(!is_hex_color("1A2B3C"));
/// ```
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|ch| ch.is_ascii_hexdigit()))
}
