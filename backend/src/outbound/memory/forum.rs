//! Spaces, channels, posts, comments, and content versions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    ChannelRepository, CommentRepository, ContentVersionRepository, PostRepository,
    RepositoryError, SpaceRepository,
};
use crate::domain::{Channel, Comment, ContentVersion, PageRequest, Post, Space};

use super::MemoryStore;
use super::table::apply_delta;

#[async_trait]
impl SpaceRepository for MemoryStore {
    async fn create(&self, space: &Space) -> Result<(), RepositoryError> {
        self.spaces.insert(
            space,
            |existing| existing.community_id == space.community_id && existing.slug == space.slug,
            "spaces_community_slug_key",
        )
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Space>, RepositoryError> {
        self.spaces.get(id)
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<Space>, RepositoryError> {
        let mut spaces = self.spaces.select(|space| space.community_id == *community_id)?;
        spaces.sort_by(|a, b| a.position.cmp(&b.position).then(a.created_at.cmp(&b.created_at)));
        Ok(spaces)
    }

    async fn update(&self, space: &Space) -> Result<(), RepositoryError> {
        self.spaces.replace(space)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.spaces.soft_delete(id, deleted_at)
    }
}

#[async_trait]
impl ChannelRepository for MemoryStore {
    async fn create(&self, channel: &Channel) -> Result<(), RepositoryError> {
        self.channels.insert(channel, |_| false, "channels_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Channel>, RepositoryError> {
        self.channels.get(id)
    }

    async fn find_by_space_id(&self, space_id: &Uuid) -> Result<Vec<Channel>, RepositoryError> {
        let mut channels = self.channels.select(|channel| channel.space_id == *space_id)?;
        channels.sort_by(|a, b| a.position.cmp(&b.position).then(a.created_at.cmp(&b.created_at)));
        Ok(channels)
    }

    async fn update(&self, channel: &Channel) -> Result<(), RepositoryError> {
        self.channels.replace(channel)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.channels.soft_delete(id, deleted_at)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create(&self, post: &Post) -> Result<(), RepositoryError> {
        self.posts.insert(post, |_| false, "posts_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Post>, RepositoryError> {
        self.posts.get(id)
    }

    async fn find_by_channel_id(
        &self,
        channel_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepositoryError> {
        let mut posts = self.posts.select(|post| post.channel_id == *channel_id)?;
        posts.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(page.slice(posts))
    }

    async fn update(&self, post: &Post) -> Result<(), RepositoryError> {
        self.posts.replace(post)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.posts.soft_delete(id, deleted_at)
    }

    async fn adjust_comment_count(&self, id: &Uuid, delta: i32) -> Result<(), RepositoryError> {
        self.posts
            .modify(id, |post| post.comment_count = apply_delta(post.comment_count, delta))
            .map(|_| ())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.comments.insert(comment, |_| false, "comments_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Comment>, RepositoryError> {
        self.comments.get(id)
    }

    async fn find_by_post_id(&self, post_id: &Uuid) -> Result<Vec<Comment>, RepositoryError> {
        self.comments.select(|comment| comment.post_id == *post_id)
    }

    async fn update(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.comments.replace(comment)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.comments.soft_delete(id, deleted_at)
    }

    async fn adjust_reply_count(&self, id: &Uuid, delta: i32) -> Result<(), RepositoryError> {
        self.comments
            .modify(id, |comment| comment.reply_count = apply_delta(comment.reply_count, delta))
            .map(|_| ())
    }
}

#[async_trait]
impl ContentVersionRepository for MemoryStore {
    async fn create(&self, version: &ContentVersion) -> Result<(), RepositoryError> {
        self.content_versions.insert(
            version,
            |existing| {
                existing.content_id == version.content_id && existing.version == version.version
            },
            "content_versions_content_version_key",
        )
    }

    async fn find_by_content_id(
        &self,
        content_id: &Uuid,
    ) -> Result<Vec<ContentVersion>, RepositoryError> {
        let mut versions = self
            .content_versions
            .select(|version| version.content_id == *content_id)?;
        versions.sort_by_key(|version| version.version);
        Ok(versions)
    }

    async fn latest_version(&self, content_id: &Uuid) -> Result<Option<u32>, RepositoryError> {
        Ok(self
            .content_versions
            .select(|version| version.content_id == *content_id)?
            .into_iter()
            .map(|version| version.version)
            .max())
    }
}
