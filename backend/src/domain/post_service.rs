//! Post publishing service with revision history.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::access::can_moderate;
use crate::domain::ports::{
    ChannelRepository, ContentVersionRepository, MembershipRepository, PostError, PostRepository,
    PostUseCases,
};
use crate::domain::revisions::{Revision, append_revision};
use crate::domain::text::required_text;
use crate::domain::{
    ContentKind, ContentVersion, NewPost, PageRequest, Post, PostChanges, parse_identifier,
};

const MAX_TITLE_CHARS: usize = 200;
const MAX_CONTENT_CHARS: usize = 20_000;

/// Post service implementing [`PostUseCases`].
pub struct PostService<Ch: ?Sized, P: ?Sized, V: ?Sized, M: ?Sized> {
    channels: Arc<Ch>,
    posts: Arc<P>,
    versions: Arc<V>,
    memberships: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<Ch: ?Sized, P: ?Sized, V: ?Sized, M: ?Sized> PostService<Ch, P, V, M> {
    pub fn new(
        channels: Arc<Ch>,
        posts: Arc<P>,
        versions: Arc<V>,
        memberships: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            channels,
            posts,
            versions,
            memberships,
            clock,
        }
    }
}

fn validated_title(raw: &str) -> Result<String, PostError> {
    required_text("title", raw, MAX_TITLE_CHARS).map_err(PostError::invalid_input)
}

fn validated_content(raw: &str) -> Result<String, PostError> {
    required_text("content", raw, MAX_CONTENT_CHARS).map_err(PostError::invalid_input)
}

impl<Ch, P, V, M> PostService<Ch, P, V, M>
where
    Ch: ChannelRepository + ?Sized,
    P: PostRepository + ?Sized,
    V: ContentVersionRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn existing_post(&self, id: &Uuid) -> Result<Post, PostError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(PostError::not_found)
    }

    async fn authored_post(&self, actor_id: &Uuid, id: &Uuid) -> Result<Post, PostError> {
        let post = self.existing_post(id).await?;
        if !post.is_authored_by(actor_id) {
            return Err(PostError::not_author());
        }
        Ok(post)
    }

    async fn record_revision(&self, post: &Post, editor_id: Uuid) -> Result<(), PostError> {
        let revision = Revision {
            content_id: post.id,
            kind: ContentKind::Post,
            title: &post.title,
            body: &post.content,
            editor_id,
        };
        append_revision(self.versions.as_ref(), revision, post.updated_at).await?;
        Ok(())
    }
}

#[async_trait]
impl<Ch, P, V, M> PostUseCases for PostService<Ch, P, V, M>
where
    Ch: ChannelRepository + ?Sized,
    P: PostRepository + ?Sized,
    V: ContentVersionRepository + ?Sized,
    M: MembershipRepository + ?Sized,
{
    async fn create_post(&self, input: NewPost) -> Result<Post, PostError> {
        let title = validated_title(&input.title)?;
        let content = validated_content(&input.content)?;
        let channel = self
            .channels
            .find_by_id(&input.channel_id)
            .await?
            .ok_or_else(PostError::channel_not_found)?;

        let now = self.clock.utc();
        let post = Post {
            id: Uuid::new_v4(),
            channel_id: channel.id,
            community_id: channel.community_id,
            author_id: input.author_id,
            title,
            content,
            comment_count: 0,
            like_count: 0,
            pinned: false,
            archived: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.posts.create(&post).await?;
        self.record_revision(&post, post.author_id).await?;
        Ok(post)
    }

    async fn get_post(&self, id: &str) -> Result<Post, PostError> {
        let id = parse_identifier(id).map_err(|error| PostError::invalid_input(error.to_string()))?;
        self.existing_post(&id).await
    }

    async fn list_posts(
        &self,
        channel_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostError> {
        if self.channels.find_by_id(channel_id).await?.is_none() {
            return Err(PostError::channel_not_found());
        }
        Ok(self.posts.find_by_channel_id(channel_id, page).await?)
    }

    async fn update_post(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: PostChanges,
    ) -> Result<Post, PostError> {
        let mut post = self.existing_post(id).await?;
        // Pinning is a moderation action; every other field belongs to the author.
        let pin_change = changes.pinned.filter(|pinned| *pinned != post.pinned);
        let edits_post =
            changes.title.is_some() || changes.content.is_some() || changes.archived.is_some();
        if (edits_post || pin_change.is_none()) && !post.is_authored_by(actor_id) {
            return Err(PostError::not_author());
        }
        if pin_change.is_some()
            && !can_moderate(self.memberships.as_ref(), &post.community_id, actor_id).await?
        {
            return Err(PostError::not_moderator());
        }
        let mut text_changed = false;

        if let Some(title) = changes.title {
            let title = validated_title(&title)?;
            text_changed |= title != post.title;
            post.title = title;
        }
        if let Some(content) = changes.content {
            let content = validated_content(&content)?;
            text_changed |= content != post.content;
            post.content = content;
        }
        if let Some(pinned) = pin_change {
            post.pinned = pinned;
        }
        if let Some(archived) = changes.archived {
            post.archived = archived;
        }
        post.updated_at = self.clock.utc();

        self.posts.update(&post).await?;
        if text_changed {
            self.record_revision(&post, *actor_id).await?;
        }
        Ok(post)
    }

    async fn delete_post(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), PostError> {
        self.authored_post(actor_id, id).await?;
        if self.posts.delete(id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(PostError::not_found())
        }
    }

    async fn list_post_versions(&self, id: &Uuid) -> Result<Vec<ContentVersion>, PostError> {
        self.existing_post(id).await?;
        Ok(self.versions.find_by_content_id(id).await?)
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
