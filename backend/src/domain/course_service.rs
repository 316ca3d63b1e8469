//! Course catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::access::can_manage;
use crate::domain::ports::{
    CommunityRepository, CourseError, CourseRepository, CourseUseCases, MembershipRepository,
};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{Course, CourseChanges, CourseStatus, NewCourse, parse_identifier};

const MAX_TITLE_CHARS: usize = 200;

/// Course service implementing [`CourseUseCases`].
pub struct CourseService<C: ?Sized, Co: ?Sized, M: ?Sized> {
    communities: Arc<C>,
    courses: Arc<Co>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<C: ?Sized, Co: ?Sized, M: ?Sized> CourseService<C, Co, M> {
    pub fn new(
        communities: Arc<C>,
        courses: Arc<Co>,
        memberships: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            communities,
            courses,
            memberships,
            clock,
        }
    }
}

fn validated_title(raw: &str) -> Result<String, CourseError> {
    required_text("title", raw, MAX_TITLE_CHARS).map_err(CourseError::invalid_input)
}

impl<C, Co, M> CourseService<C, Co, M>
where
    C: CommunityRepository + ?Sized,
    Co: CourseRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn ensure_manager(
        &self,
        community_id: &Uuid,
        actor_id: &Uuid,
    ) -> Result<(), CourseError> {
        if can_manage(self.memberships.as_ref(), community_id, actor_id).await? {
            Ok(())
        } else {
            Err(CourseError::not_permitted())
        }
    }

    async fn managed_course(&self, actor_id: &Uuid, id: &Uuid) -> Result<Course, CourseError> {
        let course = self
            .courses
            .find_by_id(id)
            .await?
            .ok_or_else(CourseError::not_found)?;
        self.ensure_manager(&course.community_id, actor_id).await?;
        Ok(course)
    }
}

#[async_trait]
impl<C, Co, M> CourseUseCases for CourseService<C, Co, M>
where
    C: CommunityRepository + ?Sized,
    Co: CourseRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn create_course(
        &self,
        actor_id: &Uuid,
        input: NewCourse,
    ) -> Result<Course, CourseError> {
        let title = validated_title(&input.title)?;
        if self
            .communities
            .find_by_id(&input.community_id)
            .await?
            .is_none()
        {
            return Err(CourseError::community_not_found());
        }
        self.ensure_manager(&input.community_id, actor_id).await?;

        let now = self.clock.utc();
        let course = Course {
            id: Uuid::new_v4(),
            community_id: input.community_id,
            title,
            description: optional_text(input.description),
            cover_image_url: optional_text(input.cover_image_url),
            status: CourseStatus::Draft,
            required_tier_id: input.required_tier_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.courses.create(&course).await?;
        Ok(course)
    }

    async fn get_course(&self, id: &str) -> Result<Course, CourseError> {
        let id =
            parse_identifier(id).map_err(|error| CourseError::invalid_input(error.to_string()))?;
        self.courses
            .find_by_id(&id)
            .await?
            .ok_or_else(CourseError::not_found)
    }

    async fn list_courses(&self, community_id: &Uuid) -> Result<Vec<Course>, CourseError> {
        if self.communities.find_by_id(community_id).await?.is_none() {
            return Err(CourseError::community_not_found());
        }
        Ok(self.courses.find_by_community_id(community_id).await?)
    }

    async fn update_course(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: CourseChanges,
    ) -> Result<Course, CourseError> {
        let mut course = self.managed_course(actor_id, id).await?;

        if let Some(title) = changes.title {
            course.title = validated_title(&title)?;
        }
        if changes.description.is_some() {
            course.description = optional_text(changes.description);
        }
        if changes.cover_image_url.is_some() {
            course.cover_image_url = optional_text(changes.cover_image_url);
        }
        if let Some(status) = changes.status {
            course.status = status;
        }
        if changes.required_tier_id.is_some() {
            course.required_tier_id = changes.required_tier_id;
        }
        course.updated_at = self.clock.utc();

        self.courses.update(&course).await?;
        Ok(course)
    }

    async fn delete_course(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), CourseError> {
        self.managed_course(actor_id, id).await?;
        if self.courses.delete(id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(CourseError::not_found())
        }
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
