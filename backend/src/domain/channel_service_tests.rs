//! Tests for the channel service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockChannelRepository, MockMembershipRepository, MockSpaceRepository};
use crate::domain::test_fixtures::{
    channel, fixture_clock, fixture_now, id, memberships_with_role, space,
};
use crate::domain::{ChannelKind, MemberRole};

type Service = ChannelService<MockSpaceRepository, MockChannelRepository, MockMembershipRepository>;

fn make_service_as(
    spaces: MockSpaceRepository,
    channels: MockChannelRepository,
    role: Option<MemberRole>,
) -> Service {
    ChannelService::new(
        Arc::new(spaces),
        Arc::new(channels),
        Arc::new(memberships_with_role(role)),
        fixture_clock(),
    )
}

fn make_service(spaces: MockSpaceRepository, channels: MockChannelRepository) -> Service {
    make_service_as(spaces, channels, Some(MemberRole::Admin))
}

fn stored_channel() -> MockChannelRepository {
    let stored = channel(&space(id(100)));
    let mut channels = MockChannelRepository::new();
    channels
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    channels
}

fn new_channel() -> NewChannel {
    NewChannel {
        space_id: id(200),
        name: "announcements".to_owned(),
        description: None,
        kind: ChannelKind::Announcement,
    }
}

#[tokio::test]
async fn create_inherits_community_from_space() {
    let mut spaces = MockSpaceRepository::new();
    spaces
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(space(id(100)))));
    let mut channels = MockChannelRepository::new();
    channels
        .expect_find_by_space_id()
        .return_once(|_| Ok(Vec::new()));
    channels.expect_create().times(1).return_once(|_| Ok(()));
    let service = make_service(spaces, channels);

    let created = service.create_channel(&id(1), new_channel()).await.expect("created");

    assert_eq!(created.community_id, id(100));
    assert_eq!(created.space_id, id(200));
    assert_eq!(created.position, 0);
    assert_eq!(created.created_at, fixture_now());
}

#[tokio::test]
async fn create_in_missing_space_is_not_found() {
    let mut spaces = MockSpaceRepository::new();
    spaces.expect_find_by_id().return_once(|_| Ok(None));
    let mut channels = MockChannelRepository::new();
    channels.expect_create().times(0);
    let service = make_service(spaces, channels);

    let error = service
        .create_channel(&id(1), new_channel())
        .await
        .expect_err("missing space");
    assert_eq!(error, ChannelError::space_not_found());
}

#[tokio::test]
async fn update_switches_kind() {
    let mut channels = stored_channel();
    channels.expect_update().times(1).return_once(|_| Ok(()));
    let service = make_service(MockSpaceRepository::new(), channels);

    let updated = service
        .update_channel(
            &id(1),
            &id(300),
            ChannelChanges {
                kind: Some(ChannelKind::Chat),
                ..ChannelChanges::default()
            },
        )
        .await
        .expect("updated");
    assert_eq!(updated.kind, ChannelKind::Chat);
}

#[tokio::test]
async fn get_rejects_malformed_id() {
    let mut channels = MockChannelRepository::new();
    channels.expect_find_by_id().times(0);
    let service = make_service(MockSpaceRepository::new(), channels);

    let error = service.get_channel("42").await.expect_err("malformed");
    assert!(matches!(error, ChannelError::InvalidInput { .. }));
}

#[tokio::test]
async fn members_cannot_create_channels() {
    let mut spaces = MockSpaceRepository::new();
    spaces
        .expect_find_by_id()
        .return_once(|_| Ok(Some(space(id(100)))));
    let mut channels = MockChannelRepository::new();
    channels.expect_create().times(0);
    let service = make_service_as(spaces, channels, Some(MemberRole::Member));

    let error = service
        .create_channel(&id(2), new_channel())
        .await
        .expect_err("forbidden");
    assert_eq!(error, ChannelError::not_permitted());
}

#[tokio::test]
async fn outsiders_cannot_delete_channels() {
    let mut channels = stored_channel();
    channels.expect_delete().times(0);
    let service = make_service_as(MockSpaceRepository::new(), channels, None);

    let error = service
        .delete_channel(&id(2), &id(300))
        .await
        .expect_err("forbidden");
    assert_eq!(error, ChannelError::not_permitted());
}
