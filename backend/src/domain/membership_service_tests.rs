//! Tests for the membership service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockCommunityRepository, MockMembershipRepository, RepositoryError};
use crate::domain::test_fixtures::{community, fixture_clock, fixture_now, id};

fn make_service(
    communities: MockCommunityRepository,
    memberships: MockMembershipRepository,
) -> MembershipService<MockCommunityRepository, MockMembershipRepository> {
    MembershipService::new(Arc::new(communities), Arc::new(memberships), fixture_clock())
}

fn existing_community() -> MockCommunityRepository {
    let mut communities = MockCommunityRepository::new();
    communities
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(community(id(1)))));
    communities
}

#[tokio::test]
async fn join_creates_member_role() {
    let mut memberships = MockMembershipRepository::new();
    memberships
        .expect_create()
        .withf(|membership| membership.role == MemberRole::Member)
        .times(1)
        .return_once(|_| Ok(()));
    let service = make_service(existing_community(), memberships);

    let membership = service
        .join_community(&id(100), &id(2))
        .await
        .expect("joined");

    assert_eq!(membership.community_id, id(100));
    assert_eq!(membership.user_id, id(2));
    assert_eq!(membership.joined_at, fixture_now());
}

#[tokio::test]
async fn joining_twice_is_a_conflict() {
    let mut memberships = MockMembershipRepository::new();
    memberships
        .expect_create()
        .times(1)
        .return_once(|_| Err(RepositoryError::duplicate("memberships_pair_key")));
    let service = make_service(existing_community(), memberships);

    let error = service
        .join_community(&id(100), &id(2))
        .await
        .expect_err("duplicate");
    assert_eq!(error, MembershipError::already_member());
}

#[tokio::test]
async fn joining_unknown_community_is_not_found() {
    let mut communities = MockCommunityRepository::new();
    communities
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    let mut memberships = MockMembershipRepository::new();
    memberships.expect_create().times(0);
    let service = make_service(communities, memberships);

    let error = service
        .join_community(&id(100), &id(2))
        .await
        .expect_err("missing community");
    assert_eq!(error, MembershipError::community_not_found());
}

#[tokio::test]
async fn list_passes_page_through() {
    let mut memberships = MockMembershipRepository::new();
    memberships
        .expect_find_by_community_id()
        .withf(|_, page| page.limit() == 20 && page.offset() == 0)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));
    let service = make_service(existing_community(), memberships);

    let members = service
        .list_members(&id(100), PageRequest::default())
        .await
        .expect("listed");
    assert!(members.is_empty());
}

#[tokio::test]
async fn owner_cannot_leave() {
    let mut memberships = MockMembershipRepository::new();
    memberships.expect_find().times(1).return_once(|_, _| {
        Ok(Some(Membership::new(id(100), id(1), MemberRole::Owner, fixture_now())))
    });
    memberships.expect_delete().times(0);
    let service = make_service(MockCommunityRepository::new(), memberships);

    let error = service
        .leave_community(&id(100), &id(1))
        .await
        .expect_err("owner stays");
    assert_eq!(error, MembershipError::owner_cannot_leave());
}

#[tokio::test]
async fn member_leaves_by_soft_delete() {
    let membership = Membership::new(id(100), id(2), MemberRole::Member, fixture_now());
    let membership_id = membership.id;
    let mut memberships = MockMembershipRepository::new();
    memberships
        .expect_find()
        .times(1)
        .return_once(move |_, _| Ok(Some(membership)));
    memberships
        .expect_delete()
        .withf(move |deleted, _| *deleted == membership_id)
        .times(1)
        .return_once(|_, _| Ok(true));
    let service = make_service(MockCommunityRepository::new(), memberships);

    service
        .leave_community(&id(100), &id(2))
        .await
        .expect("left");
}
