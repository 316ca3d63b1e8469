//! Tests for the post service.

use std::sync::Arc;

use super::*;
use rstest::rstest;

use crate::domain::ports::{
    MockChannelRepository, MockContentVersionRepository, MockMembershipRepository,
    MockPostRepository,
};
use crate::domain::test_fixtures::{
    channel, fixture_clock, fixture_now, id, memberships_with_role, post, space,
};
use crate::domain::{ErrorCode, MemberRole};

type Service = PostService<
    MockChannelRepository,
    MockPostRepository,
    MockContentVersionRepository,
    MockMembershipRepository,
>;

fn make_service_as(
    channels: MockChannelRepository,
    posts: MockPostRepository,
    versions: MockContentVersionRepository,
    role: Option<MemberRole>,
) -> Service {
    PostService::new(
        Arc::new(channels),
        Arc::new(posts),
        Arc::new(versions),
        Arc::new(memberships_with_role(role)),
        fixture_clock(),
    )
}

fn make_service(
    channels: MockChannelRepository,
    posts: MockPostRepository,
    versions: MockContentVersionRepository,
) -> Service {
    make_service_as(channels, posts, versions, Some(MemberRole::Member))
}

fn pin() -> PostChanges {
    PostChanges {
        pinned: Some(true),
        ..PostChanges::default()
    }
}

fn stored_post(author: uuid::Uuid) -> MockPostRepository {
    let stored = post(&channel(&space(id(100))), author);
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    posts
}

fn expect_version(number_after: Option<u32>, expected: u32) -> MockContentVersionRepository {
    let mut versions = MockContentVersionRepository::new();
    versions
        .expect_latest_version()
        .times(1)
        .return_once(move |_| Ok(number_after));
    versions
        .expect_create()
        .withf(move |version| version.version == expected && version.content_kind == ContentKind::Post)
        .times(1)
        .return_once(|_| Ok(()));
    versions
}

#[tokio::test]
async fn create_records_first_version() {
    let mut channels = MockChannelRepository::new();
    channels
        .expect_find_by_id()
        .return_once(|_| Ok(Some(channel(&space(id(100))))));
    let mut posts = MockPostRepository::new();
    posts.expect_create().times(1).return_once(|_| Ok(()));
    let service = make_service(channels, posts, expect_version(None, 1));

    let created = service
        .create_post(NewPost {
            channel_id: id(300),
            author_id: id(1),
            title: " Hello ".to_owned(),
            content: "World".to_owned(),
        })
        .await
        .expect("created");

    assert_eq!(created.title, "Hello");
    assert_eq!(created.community_id, id(100));
    assert_eq!(created.comment_count, 0);
    assert_eq!(created.created_at, fixture_now());
}

#[tokio::test]
async fn create_in_missing_channel_is_not_found() {
    let mut channels = MockChannelRepository::new();
    channels.expect_find_by_id().return_once(|_| Ok(None));
    let mut posts = MockPostRepository::new();
    posts.expect_create().times(0);
    let service = make_service(channels, posts, MockContentVersionRepository::new());

    let error = service
        .create_post(NewPost {
            channel_id: id(300),
            author_id: id(1),
            title: "Hello".to_owned(),
            content: "World".to_owned(),
        })
        .await
        .expect_err("missing channel");
    assert_eq!(error, PostError::channel_not_found());
}

#[tokio::test]
async fn text_edit_appends_version() {
    let mut posts = stored_post(id(1));
    posts.expect_update().times(1).return_once(|_| Ok(()));
    let service = make_service(MockChannelRepository::new(), posts, expect_version(Some(1), 2));

    let updated = service
        .update_post(
            &id(1),
            &id(400),
            PostChanges {
                content: Some("Edited".to_owned()),
                ..PostChanges::default()
            },
        )
        .await
        .expect("updated");
    assert_eq!(updated.content, "Edited");
}

#[tokio::test]
async fn pinning_does_not_create_a_version() {
    let mut posts = stored_post(id(1));
    posts.expect_update().times(1).return_once(|_| Ok(()));
    let mut versions = MockContentVersionRepository::new();
    versions.expect_create().times(0);
    let service = make_service_as(
        MockChannelRepository::new(),
        posts,
        versions,
        Some(MemberRole::Moderator),
    );

    let updated = service
        .update_post(&id(2), &id(400), pin())
        .await
        .expect("updated");
    assert!(updated.pinned);
}

#[tokio::test]
async fn only_the_author_may_edit() {
    let mut posts = stored_post(id(1));
    posts.expect_update().times(0);
    let service = make_service(
        MockChannelRepository::new(),
        posts,
        MockContentVersionRepository::new(),
    );

    let error = service
        .update_post(&id(2), &id(400), PostChanges::default())
        .await
        .expect_err("forbidden");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn only_the_author_may_delete() {
    let mut posts = stored_post(id(1));
    posts.expect_delete().times(0);
    let service = make_service(
        MockChannelRepository::new(),
        posts,
        MockContentVersionRepository::new(),
    );

    let error = service
        .delete_post(&id(2), &id(400))
        .await
        .expect_err("forbidden");
    assert_eq!(error, PostError::not_author());
}

#[tokio::test]
async fn versions_of_missing_post_are_not_found() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().return_once(|_| Ok(None));
    let mut versions = MockContentVersionRepository::new();
    versions.expect_find_by_content_id().times(0);
    let service = make_service(MockChannelRepository::new(), posts, versions);

    let error = service
        .list_post_versions(&id(400))
        .await
        .expect_err("missing");
    assert_eq!(error, PostError::not_found());
}

#[rstest]
#[case(None)]
#[case(Some(MemberRole::Member))]
#[tokio::test]
async fn authors_cannot_pin_their_own_posts(#[case] role: Option<MemberRole>) {
    let mut posts = stored_post(id(1));
    posts.expect_update().times(0);
    let service = make_service_as(
        MockChannelRepository::new(),
        posts,
        MockContentVersionRepository::new(),
        role,
    );

    let error = service
        .update_post(&id(1), &id(400), pin())
        .await
        .expect_err("forbidden");
    assert_eq!(error, PostError::not_moderator());
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn moderators_cannot_edit_others_posts() {
    let mut posts = stored_post(id(1));
    posts.expect_update().times(0);
    let service = make_service_as(
        MockChannelRepository::new(),
        posts,
        MockContentVersionRepository::new(),
        Some(MemberRole::Admin),
    );

    let error = service
        .update_post(
            &id(2),
            &id(400),
            PostChanges {
                title: Some("Renamed".to_owned()),
                ..pin()
            },
        )
        .await
        .expect_err("forbidden");
    assert_eq!(error, PostError::not_author());
}
