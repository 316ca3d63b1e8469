//! Communities, memberships, and user accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    CommunityRepository, MembershipRepository, RepositoryError, UserRepository,
};
use crate::domain::{Community, Membership, PageRequest, User};

use super::{MemoryStore, UserRecord};

#[async_trait]
impl CommunityRepository for MemoryStore {
    async fn create(&self, community: &Community) -> Result<(), RepositoryError> {
        self.communities.insert(
            community,
            |existing| existing.slug == community.slug,
            "communities_slug_key",
        )
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Community>, RepositoryError> {
        self.communities.get(id)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Community>, RepositoryError> {
        self.communities.find(|community| community.slug == slug)
    }

    async fn update(&self, community: &Community) -> Result<(), RepositoryError> {
        self.communities.replace(community)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.communities.soft_delete(id, deleted_at)
    }
}

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn create(&self, membership: &Membership) -> Result<(), RepositoryError> {
        self.memberships.insert(
            membership,
            |existing| {
                existing.community_id == membership.community_id
                    && existing.user_id == membership.user_id
            },
            "memberships_community_user_key",
        )
    }

    async fn find(
        &self,
        community_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Membership>, RepositoryError> {
        self.memberships.find(|membership| {
            membership.community_id == *community_id && membership.user_id == *user_id
        })
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Membership>, RepositoryError> {
        let mut members = self
            .memberships
            .select(|membership| membership.community_id == *community_id)?;
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.id.cmp(&b.id)));
        Ok(page.slice(members))
    }

    async fn update(&self, membership: &Membership) -> Result<(), RepositoryError> {
        self.memberships.replace(membership)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.memberships.soft_delete(id, deleted_at)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError> {
        let record = UserRecord {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        };
        self.users.insert(
            &record,
            |existing| existing.user.email == user.email,
            "users_email_key",
        )
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(id)?.map(|record| record.user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .find(|record| record.user.email == email)?
            .map(|record| record.user))
    }

    async fn find_password_hash(&self, id: &Uuid) -> Result<Option<String>, RepositoryError> {
        Ok(self.users.get(id)?.map(|record| record.password_hash))
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        self.users
            .modify(&user.id, |record| record.user = user.clone())
            .map(|_| ())
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.users.soft_delete(id, deleted_at)
    }
}
