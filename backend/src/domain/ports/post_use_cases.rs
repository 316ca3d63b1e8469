//! Driving port for posts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContentVersion, NewPost, PageRequest, Post, PostChanges};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of post use cases.
    pub enum PostError {
        InvalidInput { message: String } => "invalid post input: {message}" as InvalidRequest,
        NotFound => "post not found" as NotFound,
        ChannelNotFound => "channel not found" as NotFound,
        NotAuthor => "only the author may change this post" as Forbidden,
        NotModerator => "only community moderators may pin posts" as Forbidden,
    }
}

/// Post use cases.
#[async_trait]
pub trait PostUseCases: Send + Sync {
    /// Publish a post and record its first version.
    async fn create_post(&self, input: NewPost) -> Result<Post, PostError>;

    async fn get_post(&self, id: &str) -> Result<Post, PostError>;

    async fn list_posts(
        &self,
        channel_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostError>;

    /// Edit on behalf of the author; text edits append a version.
    /// Pinning is reserved to moderators, who may pin any post.
    async fn update_post(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: PostChanges,
    ) -> Result<Post, PostError>;

    async fn delete_post(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), PostError>;

    /// Revision history, oldest first.
    async fn list_post_versions(&self, id: &Uuid) -> Result<Vec<ContentVersion>, PostError>;
}
