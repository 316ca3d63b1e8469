//! Tests for the lesson service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockContentVersionRepository, MockCourseRepository, MockLessonRepository,
    MockMembershipRepository,
};
use crate::domain::test_fixtures::{course, fixture_clock, id, lesson, memberships_with_role};
use crate::domain::{ErrorCode, MemberRole};

type Service = LessonService<
    MockCourseRepository,
    MockLessonRepository,
    MockContentVersionRepository,
    MockMembershipRepository,
>;

fn make_service_as(
    courses: MockCourseRepository,
    lessons: MockLessonRepository,
    versions: MockContentVersionRepository,
    role: Option<MemberRole>,
) -> Service {
    LessonService::new(
        Arc::new(courses),
        Arc::new(lessons),
        Arc::new(versions),
        Arc::new(memberships_with_role(role)),
        fixture_clock(),
    )
}

fn make_service(
    courses: MockCourseRepository,
    lessons: MockLessonRepository,
    versions: MockContentVersionRepository,
) -> Service {
    make_service_as(courses, lessons, versions, Some(MemberRole::Admin))
}

fn live_course() -> MockCourseRepository {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .return_once(|_| Ok(Some(course(id(100)))));
    courses
}

fn new_lesson(position: Option<u32>) -> NewLesson {
    NewLesson {
        course_id: id(500),
        title: "Borrowing".to_owned(),
        content: "Shared and mutable references".to_owned(),
        video_url: None,
        position,
        duration_minutes: Some(12),
    }
}

fn first_version() -> MockContentVersionRepository {
    let mut versions = MockContentVersionRepository::new();
    versions.expect_latest_version().return_once(|_| Ok(None));
    versions
        .expect_create()
        .withf(|version| version.version == 1 && version.content_kind == ContentKind::Lesson)
        .times(1)
        .return_once(|_| Ok(()));
    versions
}

#[tokio::test]
async fn create_appends_after_last_lesson() {
    let mut lessons = MockLessonRepository::new();
    lessons.expect_find_by_course_id().return_once(|course_id| {
        Ok(vec![lesson(id(1), *course_id, 0), lesson(id(2), *course_id, 3)])
    });
    lessons
        .expect_create()
        .withf(|lesson| lesson.position == 4)
        .times(1)
        .return_once(|_| Ok(()));
    let service = make_service(live_course(), lessons, first_version());

    let created = service
        .create_lesson(&id(9), new_lesson(None))
        .await
        .expect("created");
    assert_eq!(created.position, 4);
}

#[tokio::test]
async fn explicit_position_skips_lookup() {
    let mut lessons = MockLessonRepository::new();
    lessons.expect_find_by_course_id().times(0);
    lessons.expect_create().times(1).return_once(|_| Ok(()));
    let service = make_service(live_course(), lessons, first_version());

    let created = service
        .create_lesson(&id(9), new_lesson(Some(7)))
        .await
        .expect("created");
    assert_eq!(created.position, 7);
}

#[tokio::test]
async fn get_missing_lesson_is_not_found() {
    let mut lessons = MockLessonRepository::new();
    lessons.expect_find_by_id().return_once(|_| Ok(None));
    let service = make_service(
        MockCourseRepository::new(),
        lessons,
        MockContentVersionRepository::new(),
    );

    let error = service
        .get_lesson(&id(1).to_string())
        .await
        .expect_err("missing");
    assert_eq!(error, LessonError::not_found());
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn unchanged_content_records_no_version() {
    let stored = lesson(id(1), id(500), 0);
    let same_content = stored.content.clone();
    let mut lessons = MockLessonRepository::new();
    lessons
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    lessons.expect_update().times(1).return_once(|_| Ok(()));
    let mut versions = MockContentVersionRepository::new();
    versions.expect_create().times(0);
    let service = make_service(live_course(), lessons, versions);

    service
        .update_lesson(
            &id(9),
            &id(1),
            LessonChanges {
                content: Some(same_content),
                position: Some(2),
                ..LessonChanges::default()
            },
        )
        .await
        .expect("updated");
}

#[tokio::test]
async fn list_in_missing_course_is_not_found() {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));
    let service = make_service(
        courses,
        MockLessonRepository::new(),
        MockContentVersionRepository::new(),
    );

    let error = service.list_lessons(&id(500)).await.expect_err("missing");
    assert_eq!(error, LessonError::course_not_found());
}

#[tokio::test]
async fn members_cannot_write_lessons() {
    let mut lessons = MockLessonRepository::new();
    lessons.expect_create().times(0);
    let service = make_service_as(
        live_course(),
        lessons,
        MockContentVersionRepository::new(),
        Some(MemberRole::Member),
    );

    let error = service
        .create_lesson(&id(9), new_lesson(None))
        .await
        .expect_err("forbidden");
    assert_eq!(error, LessonError::not_permitted());
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn outsiders_cannot_delete_lessons() {
    let mut lessons = MockLessonRepository::new();
    lessons
        .expect_find_by_id()
        .return_once(|_| Ok(Some(lesson(id(1), id(500), 0))));
    lessons.expect_delete().times(0);
    let service = make_service_as(
        live_course(),
        lessons,
        MockContentVersionRepository::new(),
        None,
    );

    let error = service
        .delete_lesson(&id(9), &id(1))
        .await
        .expect_err("forbidden");
    assert_eq!(error, LessonError::not_permitted());
}
