//! Comment service enforcing one level of threading.
//!
//! A reply must name a top-level comment of the same post. Creating or
//! deleting a comment keeps the post's comment counter and the parent's
//! reply counter in step, and notifies the author being answered. Deleting a
//! top-level comment removes its replies with it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::notification_service::deliver;
use crate::domain::ports::{
    CommentError, CommentRepository, CommentUseCases, NotificationRepository, PostRepository,
};
use crate::domain::text::required_text;
use crate::domain::{
    Comment, CommentThread, NewComment, Notification, NotificationKind, Post, build_threads,
};

const MAX_CONTENT_CHARS: usize = 10_000;

/// Comment service implementing [`CommentUseCases`].
pub struct CommentService<P: ?Sized, Cm: ?Sized, N: ?Sized> {
    posts: Arc<P>,
    comments: Arc<Cm>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<P: ?Sized, Cm: ?Sized, N: ?Sized> CommentService<P, Cm, N> {
    pub fn new(
        posts: Arc<P>,
        comments: Arc<Cm>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            comments,
            notifications,
            clock,
        }
    }
}

fn validated_content(raw: &str) -> Result<String, CommentError> {
    required_text("content", raw, MAX_CONTENT_CHARS).map_err(CommentError::invalid_input)
}

/// Who should hear about `comment`, if anyone.
fn notification_for(post: &Post, parent: Option<&Comment>, comment: &Comment) -> Option<Notification> {
    let link = format!("/posts/{}#comment-{}", post.id, comment.id);
    let notification = match parent {
        Some(parent) if parent.author_id != comment.author_id => Notification::new(
            parent.author_id,
            NotificationKind::CommentReply,
            "New reply",
            format!("Someone replied to your comment on \"{}\"", post.title),
            comment.created_at,
        ),
        None if post.author_id != comment.author_id => Notification::new(
            post.author_id,
            NotificationKind::PostComment,
            "New comment",
            format!("Someone commented on \"{}\"", post.title),
            comment.created_at,
        ),
        _ => return None,
    };
    Some(notification.in_community(post.community_id).linking_to(link))
}

impl<P, Cm, N> CommentService<P, Cm, N>
where
    P: PostRepository + ?Sized,
    Cm: CommentRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    async fn thread_parent(
        &self,
        post_id: &Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<Option<Comment>, CommentError> {
        let Some(parent_id) = parent_id else {
            return Ok(None);
        };
        let parent = self
            .comments
            .find_by_id(&parent_id)
            .await?
            .ok_or_else(CommentError::parent_not_found)?;
        if parent.post_id != *post_id {
            return Err(CommentError::parent_mismatch());
        }
        if parent.is_reply() {
            return Err(CommentError::nested_reply());
        }
        Ok(Some(parent))
    }

    async fn authored_comment(&self, actor_id: &Uuid, id: &Uuid) -> Result<Comment, CommentError> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or_else(CommentError::not_found)?;
        if !comment.is_authored_by(actor_id) {
            return Err(CommentError::not_author());
        }
        Ok(comment)
    }
}

#[async_trait]
impl<P, Cm, N> CommentUseCases for CommentService<P, Cm, N>
where
    P: PostRepository + ?Sized,
    Cm: CommentRepository + ?Sized,
    N: NotificationRepository + ?Sized,
{
    async fn create_comment(&self, input: NewComment) -> Result<Comment, CommentError> {
        let content = validated_content(&input.content)?;
        let post = self
            .posts
            .find_by_id(&input.post_id)
            .await?
            .ok_or_else(CommentError::post_not_found)?;
        let parent = self.thread_parent(&post.id, input.parent_id).await?;

        let now = self.clock.utc();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: post.id,
            author_id: input.author_id,
            parent_id: parent.as_ref().map(|parent| parent.id),
            content,
            like_count: 0,
            reply_count: 0,
            archived: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.comments.create(&comment).await?;
        self.posts.adjust_comment_count(&post.id, 1).await?;
        if let Some(parent) = &parent {
            self.comments.adjust_reply_count(&parent.id, 1).await?;
        }

        if let Some(notification) = notification_for(&post, parent.as_ref(), &comment) {
            deliver(self.notifications.as_ref(), notification).await;
        }
        Ok(comment)
    }

    async fn list_comments(&self, post_id: &Uuid) -> Result<Vec<CommentThread>, CommentError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(CommentError::post_not_found());
        }
        let comments = self.comments.find_by_post_id(post_id).await?;
        Ok(build_threads(comments))
    }

    async fn update_comment(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        content: String,
    ) -> Result<Comment, CommentError> {
        let mut comment = self.authored_comment(actor_id, id).await?;
        comment.content = validated_content(&content)?;
        comment.updated_at = self.clock.utc();
        self.comments.update(&comment).await?;
        Ok(comment)
    }

    async fn delete_comment(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), CommentError> {
        let comment = self.authored_comment(actor_id, id).await?;
        let now = self.clock.utc();
        if !self.comments.delete(id, now).await? {
            return Err(CommentError::not_found());
        }

        let mut removed: i32 = 1;
        match comment.parent_id {
            Some(parent_id) => self.comments.adjust_reply_count(&parent_id, -1).await?,
            None => {
                let replies = self.comments.find_by_post_id(&comment.post_id).await?;
                for reply in replies.iter().filter(|reply| reply.parent_id == Some(comment.id)) {
                    if self.comments.delete(&reply.id, now).await? {
                        removed = removed.saturating_add(1);
                    }
                }
            }
        }
        self.posts
            .adjust_comment_count(&comment.post_id, -removed)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
