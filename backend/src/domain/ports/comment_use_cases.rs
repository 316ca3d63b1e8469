//! Driving port for comments.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, CommentThread, NewComment};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of comment use cases.
    pub enum CommentError {
        InvalidInput { message: String } => "invalid comment input: {message}" as InvalidRequest,
        NotFound => "comment not found" as NotFound,
        PostNotFound => "post not found" as NotFound,
        ParentNotFound => "parent comment not found" as NotFound,
        /// The parent belongs to a different post.
        ParentMismatch => "parent comment belongs to a different post" as InvalidRequest,
        /// The parent is itself a reply.
        NestedReply => "replies cannot be nested more than one level" as InvalidRequest,
        NotAuthor => "only the author may change this comment" as Forbidden,
    }
}

/// Comment use cases.
#[async_trait]
pub trait CommentUseCases: Send + Sync {
    /// Add a comment or a reply and notify the people involved.
    async fn create_comment(&self, input: NewComment) -> Result<Comment, CommentError>;

    /// Comments of a post grouped into threads.
    async fn list_comments(&self, post_id: &Uuid) -> Result<Vec<CommentThread>, CommentError>;

    async fn update_comment(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        content: String,
    ) -> Result<Comment, CommentError>;

    async fn delete_comment(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), CommentError>;
}
