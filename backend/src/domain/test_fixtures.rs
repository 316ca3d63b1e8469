//! Shared builders for domain service tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::ports::MockMembershipRepository;
use super::{
    BillingInterval, Channel, ChannelKind, Comment, Community, Course, CourseStatus, Lesson,
    MemberRole, Membership, PaymentTier, Post, Progress, Space, SpaceVisibility, User,
};

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

pub(crate) fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub(crate) fn community(owner: Uuid) -> Community {
    let at = fixture_now();
    Community {
        id: id(100),
        name: "Rust Guild".to_owned(),
        slug: "rust-guild".to_owned(),
        logo_url: None,
        primary_color: Some("#b7410e".to_owned()),
        owner_id: owner,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn user(user_id: Uuid) -> User {
    let at = fixture_now();
    User {
        id: user_id,
        email: "ada@example.com".to_owned(),
        display_name: "Ada".to_owned(),
        avatar_url: None,
        bio: None,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn space(community_id: Uuid) -> Space {
    let at = fixture_now();
    Space {
        id: id(200),
        community_id,
        name: "General".to_owned(),
        slug: "general".to_owned(),
        description: None,
        visibility: SpaceVisibility::Public,
        position: 0,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn channel(space: &Space) -> Channel {
    let at = fixture_now();
    Channel {
        id: id(300),
        space_id: space.id,
        community_id: space.community_id,
        name: "introductions".to_owned(),
        description: None,
        kind: ChannelKind::Discussion,
        position: 0,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn post(channel: &Channel, author: Uuid) -> Post {
    let at = fixture_now();
    Post {
        id: id(400),
        channel_id: channel.id,
        community_id: channel.community_id,
        author_id: author,
        title: "Hello".to_owned(),
        content: "First post".to_owned(),
        comment_count: 0,
        like_count: 0,
        pinned: false,
        archived: false,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn comment(comment_id: Uuid, post_id: Uuid, author: Uuid, parent: Option<Uuid>) -> Comment {
    let at = fixture_now();
    Comment {
        id: comment_id,
        post_id,
        author_id: author,
        parent_id: parent,
        content: "Nice".to_owned(),
        like_count: 0,
        reply_count: 0,
        archived: false,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn course(community_id: Uuid) -> Course {
    let at = fixture_now();
    Course {
        id: id(500),
        community_id,
        title: "Ownership 101".to_owned(),
        description: None,
        cover_image_url: None,
        status: CourseStatus::Published,
        required_tier_id: None,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn lesson(lesson_id: Uuid, course_id: Uuid, position: u32) -> Lesson {
    let at = fixture_now();
    Lesson {
        id: lesson_id,
        course_id,
        title: format!("Lesson {position}"),
        content: "Borrowing".to_owned(),
        video_url: None,
        position,
        duration_minutes: Some(10),
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn progress(course_id: Uuid, user_id: Uuid, completed: &[Uuid], percentage: u8) -> Progress {
    let at = fixture_now();
    Progress {
        id: id(600),
        course_id,
        user_id,
        completed_lesson_ids: completed.iter().copied().collect::<BTreeSet<_>>(),
        completion_percentage: percentage,
        started_at: at,
        updated_at: at,
        completed_at: (percentage == 100).then_some(at),
    }
}

pub(crate) fn tier(community_id: Uuid, active: bool) -> PaymentTier {
    let at = fixture_now();
    PaymentTier {
        id: id(700),
        community_id,
        name: "Supporter".to_owned(),
        description: None,
        price_cents: 900,
        currency: "EUR".to_owned(),
        interval: BillingInterval::Monthly,
        features: vec!["courses".to_owned()],
        active,
        created_at: at,
        updated_at: at,
        deleted_at: None,
    }
}

pub(crate) fn member(community_id: Uuid, user_id: Uuid, role: MemberRole) -> Membership {
    Membership::new(community_id, user_id, role, fixture_now())
}

/// Membership lookups answering with `role` (or no membership) for anyone.
pub(crate) fn memberships_with_role(role: Option<MemberRole>) -> MockMembershipRepository {
    let mut memberships = MockMembershipRepository::new();
    memberships.expect_find().returning(move |community_id, user_id| {
        Ok(role.map(|role| member(*community_id, *user_id, role)))
    });
    memberships
}
