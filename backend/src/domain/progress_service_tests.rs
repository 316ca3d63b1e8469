//! Tests for the progress service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockCourseRepository, MockLessonRepository, MockMembershipRepository,
    MockNotificationRepository, MockProgressRepository,
};
use crate::domain::test_fixtures::{
    course, fixture_clock, fixture_now, id, lesson, member, progress,
};
use crate::domain::{ErrorCode, MemberRole};

type Service = ProgressService<
    MockCourseRepository,
    MockLessonRepository,
    MockProgressRepository,
    MockNotificationRepository,
    MockMembershipRepository,
>;

const LEARNER: u128 = 2;

fn make_service(
    courses: MockCourseRepository,
    lessons: MockLessonRepository,
    progress: MockProgressRepository,
    notifications: MockNotificationRepository,
) -> Service {
    make_gated_service(courses, lessons, progress, notifications, MockMembershipRepository::new())
}

fn make_gated_service(
    courses: MockCourseRepository,
    lessons: MockLessonRepository,
    progress: MockProgressRepository,
    notifications: MockNotificationRepository,
    memberships: MockMembershipRepository,
) -> Service {
    ProgressService::new(
        Arc::new(courses),
        Arc::new(lessons),
        Arc::new(progress),
        Arc::new(notifications),
        Arc::new(memberships),
        fixture_clock(),
    )
}

fn stored_course(course: Course) -> MockCourseRepository {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(move |_| Ok(Some(course)));
    courses
}

fn untouched_progress() -> MockProgressRepository {
    let mut progress = MockProgressRepository::new();
    progress.expect_create().times(0);
    progress.expect_update().times(0);
    progress
}

fn holding_tier(tier_id: Option<Uuid>) -> MockMembershipRepository {
    let mut memberships = MockMembershipRepository::new();
    memberships.expect_find().return_once(move |community_id, user_id| {
        let mut membership = member(*community_id, *user_id, MemberRole::Member);
        membership.tier_id = tier_id;
        Ok(Some(membership))
    });
    memberships
}

fn live_course() -> MockCourseRepository {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .return_once(|_| Ok(Some(course(id(100)))));
    courses
}

/// A course with two lessons, ids 1 and 2.
fn two_lessons(completing: u128) -> MockLessonRepository {
    let mut lessons = MockLessonRepository::new();
    lessons
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(lesson(id(completing), id(500), 0))));
    lessons.expect_find_by_course_id().return_once(|course_id| {
        Ok(vec![lesson(id(1), *course_id, 0), lesson(id(2), *course_id, 1)])
    });
    lessons
}

#[tokio::test]
async fn missing_progress_is_none_not_an_error() {
    let mut progress = MockProgressRepository::new();
    progress
        .expect_find_by_course_and_user()
        .times(1)
        .return_once(|_, _| Ok(None));
    let service = make_service(
        MockCourseRepository::new(),
        MockLessonRepository::new(),
        progress,
        MockNotificationRepository::new(),
    );

    let found = service
        .get_progress(&id(500).to_string(), &id(LEARNER))
        .await
        .expect("lookup succeeds");
    assert!(found.is_none());
}

#[tokio::test]
async fn get_progress_rejects_malformed_course_id() {
    let mut progress = MockProgressRepository::new();
    progress.expect_find_by_course_and_user().times(0);
    let service = make_service(
        MockCourseRepository::new(),
        MockLessonRepository::new(),
        progress,
        MockNotificationRepository::new(),
    );

    let error = service
        .get_progress("course-1", &id(LEARNER))
        .await
        .expect_err("malformed");
    assert!(matches!(error, ProgressError::InvalidInput { .. }));
}

#[tokio::test]
async fn first_completion_starts_progress() {
    let mut progress = MockProgressRepository::new();
    progress
        .expect_find_by_course_and_user()
        .return_once(|_, _| Ok(None));
    progress
        .expect_create()
        .withf(|progress| progress.completion_percentage == 50)
        .times(1)
        .return_once(|_| Ok(()));
    progress.expect_update().times(0);
    let mut notifications = MockNotificationRepository::new();
    notifications.expect_create().times(0);
    let service = make_service(live_course(), two_lessons(1), progress, notifications);

    let updated = service
        .complete_lesson(&id(LEARNER), &id(1))
        .await
        .expect("recorded");

    assert_eq!(updated.completion_percentage, 50);
    assert_eq!(updated.started_at, fixture_now());
    assert!(updated.completed_at.is_none());
}

#[tokio::test]
async fn last_lesson_completes_course_and_notifies() {
    let mut progress_repo = MockProgressRepository::new();
    progress_repo
        .expect_find_by_course_and_user()
        .return_once(|course_id, user_id| Ok(Some(progress(*course_id, *user_id, &[id(1)], 50))));
    progress_repo
        .expect_update()
        .withf(|progress| progress.is_complete())
        .times(1)
        .return_once(|_| Ok(()));
    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .withf(|notification| {
            notification.kind == NotificationKind::CourseCompleted
                && notification.user_id == id(LEARNER)
        })
        .times(1)
        .return_once(|_| Ok(()));
    let service = make_service(live_course(), two_lessons(2), progress_repo, notifications);

    let updated = service
        .complete_lesson(&id(LEARNER), &id(2))
        .await
        .expect("recorded");

    assert_eq!(updated.completion_percentage, 100);
    assert_eq!(updated.completed_at, Some(fixture_now()));
}

#[tokio::test]
async fn unknown_lesson_is_not_found() {
    let mut lessons = MockLessonRepository::new();
    lessons.expect_find_by_id().return_once(|_| Ok(None));
    let service = make_service(
        MockCourseRepository::new(),
        lessons,
        MockProgressRepository::new(),
        MockNotificationRepository::new(),
    );

    let error = service
        .complete_lesson(&id(LEARNER), &id(1))
        .await
        .expect_err("missing lesson");
    assert_eq!(error, ProgressError::lesson_not_found());
}

#[rstest]
#[case(CourseStatus::Draft)]
#[case(CourseStatus::Archived)]
#[tokio::test]
async fn unpublished_courses_refuse_completions(#[case] status: CourseStatus) {
    let service = make_service(
        stored_course(Course {
            status,
            ..course(id(100))
        }),
        two_lessons(1),
        untouched_progress(),
        MockNotificationRepository::new(),
    );

    let error = service
        .complete_lesson(&id(LEARNER), &id(1))
        .await
        .expect_err("unpublished");
    assert_eq!(error, ProgressError::course_unavailable());
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(None)]
#[case(Some(id(701)))]
#[tokio::test]
async fn tier_locked_courses_need_the_matching_tier(#[case] held: Option<Uuid>) {
    let service = make_gated_service(
        stored_course(Course {
            required_tier_id: Some(id(700)),
            ..course(id(100))
        }),
        two_lessons(1),
        untouched_progress(),
        MockNotificationRepository::new(),
        holding_tier(held),
    );

    let error = service
        .complete_lesson(&id(LEARNER), &id(1))
        .await
        .expect_err("locked");
    assert_eq!(error, ProgressError::tier_required());
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn matching_tier_unlocks_the_course() {
    let mut progress = MockProgressRepository::new();
    progress
        .expect_find_by_course_and_user()
        .return_once(|_, _| Ok(None));
    progress.expect_create().times(1).return_once(|_| Ok(()));
    let service = make_gated_service(
        stored_course(Course {
            required_tier_id: Some(id(700)),
            ..course(id(100))
        }),
        two_lessons(1),
        progress,
        MockNotificationRepository::new(),
        holding_tier(Some(id(700))),
    );

    let updated = service
        .complete_lesson(&id(LEARNER), &id(1))
        .await
        .expect("unlocked");
    assert_eq!(updated.completion_percentage, 50);
}
