//! Lesson authoring service with revision history.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::access::can_manage;
use crate::domain::ports::{
    ContentVersionRepository, CourseRepository, LessonError, LessonRepository, LessonUseCases,
    MembershipRepository,
};
use crate::domain::revisions::{Revision, append_revision};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{
    ContentKind, ContentVersion, Lesson, LessonChanges, NewLesson, parse_identifier,
};

const MAX_TITLE_CHARS: usize = 200;
const MAX_CONTENT_CHARS: usize = 100_000;

/// Lesson service implementing [`LessonUseCases`].
pub struct LessonService<Co: ?Sized, L: ?Sized, V: ?Sized, M: ?Sized> {
    courses: Arc<Co>,
    lessons: Arc<L>,
    versions: Arc<V>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<Co: ?Sized, L: ?Sized, V: ?Sized, M: ?Sized> LessonService<Co, L, V, M> {
    pub fn new(
        courses: Arc<Co>,
        lessons: Arc<L>,
        versions: Arc<V>,
        memberships: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            courses,
            lessons,
            versions,
            memberships,
            clock,
        }
    }
}

fn validated_title(raw: &str) -> Result<String, LessonError> {
    required_text("title", raw, MAX_TITLE_CHARS).map_err(LessonError::invalid_input)
}

fn validated_content(raw: &str) -> Result<String, LessonError> {
    required_text("content", raw, MAX_CONTENT_CHARS).map_err(LessonError::invalid_input)
}

impl<Co, L, V, M> LessonService<Co, L, V, M>
where
    Co: CourseRepository + ?Sized,
    L: LessonRepository + ?Sized,
    V: ContentVersionRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn existing_lesson(&self, id: &Uuid) -> Result<Lesson, LessonError> {
        self.lessons
            .find_by_id(id)
            .await?
            .ok_or_else(LessonError::not_found)
    }

    /// Lesson writes belong to the owners and admins of the course's community.
    async fn ensure_course_manager(
        &self,
        course_id: &Uuid,
        actor_id: &Uuid,
    ) -> Result<(), LessonError> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(LessonError::course_not_found)?;
        if can_manage(self.memberships.as_ref(), &course.community_id, actor_id).await? {
            Ok(())
        } else {
            Err(LessonError::not_permitted())
        }
    }

    async fn managed_lesson(&self, actor_id: &Uuid, id: &Uuid) -> Result<Lesson, LessonError> {
        let lesson = self.existing_lesson(id).await?;
        self.ensure_course_manager(&lesson.course_id, actor_id).await?;
        Ok(lesson)
    }

    async fn record_revision(&self, lesson: &Lesson, editor_id: Uuid) -> Result<(), LessonError> {
        let revision = Revision {
            content_id: lesson.id,
            kind: ContentKind::Lesson,
            title: &lesson.title,
            body: &lesson.content,
            editor_id,
        };
        append_revision(self.versions.as_ref(), revision, lesson.updated_at).await?;
        Ok(())
    }
}

#[async_trait]
impl<Co, L, V, M> LessonUseCases for LessonService<Co, L, V, M>
where
    Co: CourseRepository + ?Sized,
    L: LessonRepository + ?Sized,
    V: ContentVersionRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn create_lesson(
        &self,
        editor_id: &Uuid,
        input: NewLesson,
    ) -> Result<Lesson, LessonError> {
        let title = validated_title(&input.title)?;
        let content = validated_content(&input.content)?;
        self.ensure_course_manager(&input.course_id, editor_id).await?;
        let position = match input.position {
            Some(position) => position,
            None => {
                let existing = self.lessons.find_by_course_id(&input.course_id).await?;
                existing
                    .iter()
                    .map(|lesson| lesson.position.saturating_add(1))
                    .max()
                    .unwrap_or(0)
            }
        };

        let now = self.clock.utc();
        let lesson = Lesson {
            id: Uuid::new_v4(),
            course_id: input.course_id,
            title,
            content,
            video_url: optional_text(input.video_url),
            position,
            duration_minutes: input.duration_minutes,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.lessons.create(&lesson).await?;
        self.record_revision(&lesson, *editor_id).await?;
        Ok(lesson)
    }

    async fn get_lesson(&self, id: &str) -> Result<Lesson, LessonError> {
        let id =
            parse_identifier(id).map_err(|error| LessonError::invalid_input(error.to_string()))?;
        self.existing_lesson(&id).await
    }

    async fn list_lessons(&self, course_id: &Uuid) -> Result<Vec<Lesson>, LessonError> {
        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(LessonError::course_not_found());
        }
        Ok(self.lessons.find_by_course_id(course_id).await?)
    }

    async fn update_lesson(
        &self,
        editor_id: &Uuid,
        id: &Uuid,
        changes: LessonChanges,
    ) -> Result<Lesson, LessonError> {
        let mut lesson = self.managed_lesson(editor_id, id).await?;
        let mut text_changed = false;

        if let Some(title) = changes.title {
            let title = validated_title(&title)?;
            text_changed |= title != lesson.title;
            lesson.title = title;
        }
        if let Some(content) = changes.content {
            let content = validated_content(&content)?;
            text_changed |= content != lesson.content;
            lesson.content = content;
        }
        if changes.video_url.is_some() {
            lesson.video_url = optional_text(changes.video_url);
        }
        if let Some(position) = changes.position {
            lesson.position = position;
        }
        if changes.duration_minutes.is_some() {
            lesson.duration_minutes = changes.duration_minutes;
        }
        lesson.updated_at = self.clock.utc();

        self.lessons.update(&lesson).await?;
        if text_changed {
            self.record_revision(&lesson, *editor_id).await?;
        }
        Ok(lesson)
    }

    async fn delete_lesson(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), LessonError> {
        self.managed_lesson(actor_id, id).await?;
        if self.lessons.delete(id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(LessonError::not_found())
        }
    }

    async fn list_lesson_versions(&self, id: &Uuid) -> Result<Vec<ContentVersion>, LessonError> {
        self.existing_lesson(id).await?;
        Ok(self.versions.find_by_content_id(id).await?)
    }
}

#[cfg(test)]
#[path = "lesson_service_tests.rs"]
mod tests;
