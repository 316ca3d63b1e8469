//! Courses, lessons, progress, and certificates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    CertificateRepository, CourseRepository, LessonRepository, ProgressRepository,
    RepositoryError,
};
use crate::domain::{Certificate, Course, Lesson, Progress};

use super::MemoryStore;

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn create(&self, course: &Course) -> Result<(), RepositoryError> {
        self.courses.insert(course, |_| false, "courses_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Course>, RepositoryError> {
        self.courses.get(id)
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<Course>, RepositoryError> {
        let mut courses = self
            .courses
            .select(|course| course.community_id == *community_id)?;
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(courses)
    }

    async fn update(&self, course: &Course) -> Result<(), RepositoryError> {
        self.courses.replace(course)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.courses.soft_delete(id, deleted_at)
    }
}

#[async_trait]
impl LessonRepository for MemoryStore {
    async fn create(&self, lesson: &Lesson) -> Result<(), RepositoryError> {
        self.lessons.insert(lesson, |_| false, "lessons_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Lesson>, RepositoryError> {
        self.lessons.get(id)
    }

    async fn find_by_course_id(&self, course_id: &Uuid) -> Result<Vec<Lesson>, RepositoryError> {
        let mut lessons = self.lessons.select(|lesson| lesson.course_id == *course_id)?;
        lessons.sort_by(|a, b| a.position.cmp(&b.position).then(a.created_at.cmp(&b.created_at)));
        Ok(lessons)
    }

    async fn update(&self, lesson: &Lesson) -> Result<(), RepositoryError> {
        self.lessons.replace(lesson)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.lessons.soft_delete(id, deleted_at)
    }
}

#[async_trait]
impl ProgressRepository for MemoryStore {
    async fn create(&self, progress: &Progress) -> Result<(), RepositoryError> {
        self.progress.insert(
            progress,
            |existing| {
                existing.course_id == progress.course_id && existing.user_id == progress.user_id
            },
            "progress_course_user_key",
        )
    }

    async fn find_by_course_and_user(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Progress>, RepositoryError> {
        self.progress
            .find(|progress| progress.course_id == *course_id && progress.user_id == *user_id)
    }

    async fn update(&self, progress: &Progress) -> Result<(), RepositoryError> {
        self.progress.replace(progress)
    }
}

#[async_trait]
impl CertificateRepository for MemoryStore {
    async fn create(&self, certificate: &Certificate) -> Result<(), RepositoryError> {
        self.certificates.insert(
            certificate,
            |existing| {
                existing.course_id == certificate.course_id
                    && existing.user_id == certificate.user_id
            },
            "certificates_course_user_key",
        )
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Certificate>, RepositoryError> {
        self.certificates.get(id)
    }

    async fn find_by_course_and_user(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Certificate>, RepositoryError> {
        self.certificates.find(|certificate| {
            certificate.course_id == *course_id && certificate.user_id == *user_id
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Certificate>, RepositoryError> {
        self.certificates
            .find(|certificate| certificate.verification_code == code)
    }

    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Vec<Certificate>, RepositoryError> {
        let mut certificates = self
            .certificates
            .select(|certificate| certificate.user_id == *user_id)?;
        certificates.sort_by(|a, b| b.issued_at.cmp(&a.issued_at).then(a.id.cmp(&b.id)));
        Ok(certificates)
    }
}
