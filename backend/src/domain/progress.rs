//! Per-user course progress.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Progress of one user through one course.
///
/// ## Invariants
/// - `completion_percentage` is within `0..=100`.
/// - `completed_at` is set once the percentage first reaches 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub completed_lesson_ids: BTreeSet<Uuid>,
    pub completion_percentage: u8,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Progress {
    /// Fresh progress with nothing completed.
    pub fn start(course_id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id,
            user_id,
            completed_lesson_ids: BTreeSet::new(),
            completion_percentage: 0,
            started_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Record `lesson_id` as done and recompute the percentage.
    ///
    /// `lesson_ids` is the full, current lesson list of the course; lessons
    /// completed earlier but since removed no longer count. Returns `true`
    /// when this call completed the course.
    pub fn record_completion(
        &mut self,
        lesson_id: Uuid,
        lesson_ids: &BTreeSet<Uuid>,
        now: DateTime<Utc>,
    ) -> bool {
        self.completed_lesson_ids.insert(lesson_id);
        let done = self.completed_lesson_ids.intersection(lesson_ids).count();
        self.completion_percentage = completion_percentage(done, lesson_ids.len());
        self.updated_at = now;

        if self.is_complete() && self.completed_at.is_none() {
            self.completed_at = Some(now);
            return true;
        }
        false
    }

    /// Whether every lesson is done.
    pub fn is_complete(&self) -> bool {
        self.completion_percentage == 100
    }
}

/// Whole-number percentage of `done` out of `total`, rounded down.
///
/// # Examples
/// ```
/// use commons::domain::completion_percentage;
///
/// assert_eq!(completion_percentage(1, 3), 33);
/// assert_eq!(completion_percentage(0, 0), 0);
/// ```
pub fn completion_percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = done.min(total) * 100 / total;
    u8::try_from(percent).unwrap_or(100)
}
