//! Notifications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, RepositoryError};
use crate::domain::{Notification, PageRequest};

use super::MemoryStore;

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, notification: &Notification) -> Result<(), RepositoryError> {
        self.notifications
            .insert(notification, |_| false, "notifications_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Notification>, RepositoryError> {
        self.notifications.get(id)
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let mut notifications = self.notifications.select(|notification| {
            notification.user_id == *user_id && !(unread_only && notification.is_read())
        })?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(page.slice(notifications))
    }

    async fn mark_read(&self, id: &Uuid, read_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let changed = self.notifications.modify_where(
            |notification| notification.id == *id && !notification.is_read(),
            |notification| notification.read_at = Some(read_at),
        )?;
        Ok(changed > 0)
    }

    async fn mark_all_read(
        &self,
        user_id: &Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        self.notifications.modify_where(
            |notification| notification.user_id == *user_id && !notification.is_read(),
            |notification| notification.read_at = Some(read_at),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationKind;
    use crate::domain::test_fixtures::{fixture_now, id};

    fn note(user: Uuid, minutes: i64) -> Notification {
        Notification::new(
            user,
            NotificationKind::PostComment,
            "New comment",
            "Someone commented",
            fixture_now() + chrono::Duration::minutes(minutes),
        )
    }

    #[tokio::test]
    async fn unread_filter_and_newest_first() {
        let store = MemoryStore::new();
        let older = note(id(1), 0);
        let newer = note(id(1), 5);
        let foreign = note(id(2), 10);
        for item in [&older, &newer, &foreign] {
            NotificationRepository::create(&store, item).await.expect("insert");
        }
        assert!(store.mark_read(&older.id, fixture_now()).await.expect("mark"));

        let all = NotificationRepository::find_by_user_id(&store, &id(1), false, PageRequest::default())
            .await
            .expect("all");
        assert_eq!(
            all.iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );

        let unread = NotificationRepository::find_by_user_id(&store, &id(1), true, PageRequest::default())
            .await
            .expect("unread");
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, newer.id);
    }

    #[tokio::test]
    async fn marking_twice_changes_nothing() {
        let store = MemoryStore::new();
        let item = note(id(1), 0);
        NotificationRepository::create(&store, &item).await.expect("insert");

        assert!(store.mark_read(&item.id, fixture_now()).await.expect("first"));
        assert!(!store.mark_read(&item.id, fixture_now()).await.expect("second"));
    }

    #[tokio::test]
    async fn mark_all_counts_only_unread_rows() {
        let store = MemoryStore::new();
        let read = note(id(1), 0);
        NotificationRepository::create(&store, &read).await.expect("insert");
        store.mark_read(&read.id, fixture_now()).await.expect("mark");
        NotificationRepository::create(&store, &note(id(1), 1)).await.expect("insert");
        NotificationRepository::create(&store, &note(id(1), 2)).await.expect("insert");

        assert_eq!(store.mark_all_read(&id(1), fixture_now()).await.expect("all"), 2);
    }
}
