//! Post comments with a single level of threading.
//!
//! A comment either sits at the top of a post's discussion or replies to a
//! top-level comment on the same post. Replies to replies are rejected when
//! comments are created, so a thread is always one parent plus its replies.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub like_count: u32,
    pub reply_count: u32,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Whether this comment answers another comment.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Whether `user_id` wrote this comment.
    pub fn is_authored_by(&self, user_id: &Uuid) -> bool {
        self.author_id == *user_id
    }
}

/// Input for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
}

/// A top-level comment together with its replies, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Group a post's comments into threads ordered by creation time.
///
/// Replies whose parent is no longer visible are dropped along with it.
pub fn build_threads(mut comments: Vec<Comment>) -> Vec<CommentThread> {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let visible_roots: Vec<Uuid> = comments
        .iter()
        .filter(|comment| !comment.is_reply())
        .map(|comment| comment.id)
        .collect();

    let mut replies: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    let mut threads = Vec::new();
    for comment in comments {
        match comment.parent_id {
            Some(parent) if visible_roots.contains(&parent) => {
                replies.entry(parent).or_default().push(comment);
            }
            Some(_) => {}
            None => threads.push(CommentThread {
                comment,
                replies: Vec::new(),
            }),
        }
    }

    for thread in &mut threads {
        if let Some(children) = replies.remove(&thread.comment.id) {
            thread.replies = children;
        }
    }
    threads
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn comment(id: u128, parent: Option<u128>, minute: u32) -> Comment {
        let at = Utc
            .with_ymd_and_hms(2026, 1, 1, 12, minute, 0)
            .single()
            .expect("valid timestamp");
        Comment {
            id: Uuid::from_u128(id),
            post_id: Uuid::from_u128(99),
            author_id: Uuid::from_u128(7),
            parent_id: parent.map(Uuid::from_u128),
            content: format!("comment {id}"),
            like_count: 0,
            reply_count: 0,
            archived: false,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    #[test]
    fn replies_nest_under_their_parent_in_order() {
        let threads = build_threads(vec![
            comment(3, Some(1), 5),
            comment(2, None, 2),
            comment(1, None, 1),
            comment(4, Some(1), 3),
        ]);

        let ids: Vec<u128> = threads.iter().map(|t| t.comment.id.as_u128()).collect();
        assert_eq!(ids, vec![1, 2]);
        let reply_ids: Vec<u128> = threads[0].replies.iter().map(|c| c.id.as_u128()).collect();
        assert_eq!(reply_ids, vec![4, 3]);
        assert!(threads[1].replies.is_empty());
    }

    #[test]
    fn replies_without_a_live_parent_are_hidden() {
        let threads = build_threads(vec![comment(5, Some(42), 1), comment(6, None, 2)]);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].comment.id, Uuid::from_u128(6));
    }
}
