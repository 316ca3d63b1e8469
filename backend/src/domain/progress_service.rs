//! Course progress tracking.
//!
//! Completing the final lesson of a course stamps `completed_at` and sends a
//! `course_completed` notification exactly once. Draft and archived courses,
//! and tier-locked courses the learner has not bought, refuse completions.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::notification_service::deliver;
use crate::domain::ports::{
    CourseRepository, LessonRepository, MembershipRepository, NotificationRepository,
    ProgressError, ProgressRepository, ProgressUseCases,
};
use crate::domain::{
    Course, CourseStatus, Notification, NotificationKind, Progress, parse_identifier,
};

/// Progress service implementing [`ProgressUseCases`].
pub struct ProgressService<Co: ?Sized, L: ?Sized, Pr: ?Sized, N: ?Sized, M: ?Sized> {
    courses: Arc<Co>,
    lessons: Arc<L>,
    progress: Arc<Pr>,
    notifications: Arc<N>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<Co: ?Sized, L: ?Sized, Pr: ?Sized, N: ?Sized, M: ?Sized> ProgressService<Co, L, Pr, N, M> {
    pub fn new(
        courses: Arc<Co>,
        lessons: Arc<L>,
        progress: Arc<Pr>,
        notifications: Arc<N>,
        memberships: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            courses,
            lessons,
            progress,
            notifications,
            memberships,
            clock,
        }
    }
}

impl<Co: ?Sized, L: ?Sized, Pr: ?Sized, N: ?Sized, M> ProgressService<Co, L, Pr, N, M>
where
    M: MembershipRepository + ?Sized,
{
    async fn ensure_open_to(&self, course: &Course, user_id: &Uuid) -> Result<(), ProgressError> {
        if course.status != CourseStatus::Published {
            return Err(ProgressError::course_unavailable());
        }
        let Some(required) = course.required_tier_id else {
            return Ok(());
        };
        let held = self
            .memberships
            .find(&course.community_id, user_id)
            .await?
            .and_then(|membership| membership.tier_id);
        if held == Some(required) {
            Ok(())
        } else {
            Err(ProgressError::tier_required())
        }
    }
}

fn completion_notice(course: &Course, progress: &Progress) -> Notification {
    Notification::new(
        progress.user_id,
        NotificationKind::CourseCompleted,
        "Course completed",
        format!("You finished \"{}\"", course.title),
        progress.updated_at,
    )
    .in_community(course.community_id)
    .linking_to(format!("/courses/{}", course.id))
}

#[async_trait]
impl<Co, L, Pr, N, M> ProgressUseCases for ProgressService<Co, L, Pr, N, M>
where
    Co: CourseRepository + ?Sized,
    L: LessonRepository + ?Sized,
    Pr: ProgressRepository + ?Sized,
    N: NotificationRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn get_progress(
        &self,
        course_id: &str,
        user_id: &Uuid,
    ) -> Result<Option<Progress>, ProgressError> {
        let course_id = parse_identifier(course_id)
            .map_err(|error| ProgressError::invalid_input(error.to_string()))?;
        Ok(self
            .progress
            .find_by_course_and_user(&course_id, user_id)
            .await?)
    }

    async fn complete_lesson(
        &self,
        user_id: &Uuid,
        lesson_id: &Uuid,
    ) -> Result<Progress, ProgressError> {
        let lesson = self
            .lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(ProgressError::lesson_not_found)?;
        let course = self
            .courses
            .find_by_id(&lesson.course_id)
            .await?
            .ok_or_else(ProgressError::course_not_found)?;
        self.ensure_open_to(&course, user_id).await?;
        let lesson_ids: BTreeSet<Uuid> = self
            .lessons
            .find_by_course_id(&course.id)
            .await?
            .into_iter()
            .map(|lesson| lesson.id)
            .collect();

        let now = self.clock.utc();
        let existing = self
            .progress
            .find_by_course_and_user(&course.id, user_id)
            .await?;
        let is_new = existing.is_none();
        let mut progress = existing.unwrap_or_else(|| Progress::start(course.id, *user_id, now));
        let finished = progress.record_completion(lesson.id, &lesson_ids, now);

        if is_new {
            self.progress.create(&progress).await?;
        } else {
            self.progress.update(&progress).await?;
        }
        tracing::debug!(
            course_id = %course.id,
            user_id = %user_id,
            percentage = progress.completion_percentage,
            "lesson completed"
        );

        if finished {
            deliver(
                self.notifications.as_ref(),
                completion_notice(&course, &progress),
            )
            .await;
        }
        Ok(progress)
    }
}

#[cfg(test)]
#[path = "progress_service_tests.rs"]
mod tests;
