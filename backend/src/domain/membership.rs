//! Community membership and roles.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::label::define_label_enum;

define_label_enum! {
    /// Role a member holds inside a community.
    pub enum MemberRole {
        Owner => "owner",
        Admin => "admin",
        Moderator => "moderator",
        Member => "member",
    }
}

impl MemberRole {
    /// Owners and admins manage spaces, channels, courses and billing.
    #[must_use]
    pub fn can_manage(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Moderators and above curate posts.
    #[must_use]
    pub fn can_moderate(self) -> bool {
        self.can_manage() || matches!(self, Self::Moderator)
    }
}

/// Link between a user and a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    /// Payment tier unlocked through checkout, if any.
    pub tier_id: Option<Uuid>,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Membership {
    /// Start a membership at `now`.
    pub fn new(community_id: Uuid, user_id: Uuid, role: MemberRole, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            community_id,
            user_id,
            role,
            tier_id: None,
            joined_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}
