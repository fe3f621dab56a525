use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::result::AppResult;
use portfoliofy_core::types::PageRequest;
use portfoliofy_entity::notification::{NewNotification, Notification, NotificationFilter};

use super::{MemoryStore, newest_first};
use crate::store::NotificationStore;

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let notification = notification.into_notification();
        self.notifications
            .insert(notification.id, self.row(notification.clone()));
        Ok(notification)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self.notifications.get(&id).map(|r| r.value.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<Notification>> {
        let all = newest_first(
            self.notifications
                .iter()
                .filter(|r| r.value.user_id == user_id && filter.matches(&r.value))
                .map(|r| (r.value.created_at, r.seq, r.value.clone()))
                .collect(),
        );
        Ok(match page {
            Some(page) => page.slice(all),
            None => all,
        })
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .notifications
            .iter()
            .filter(|r| r.value.user_id == user_id && r.value.is_unread())
            .count() as u64)
    }

    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Notification> {
        let mut row = self
            .notifications
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;
        row.value.mark_read(at);
        Ok(row.value.clone())
    }

    async fn mark_all_read(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<u64> {
        let mut changed = 0;
        for mut row in self.notifications.iter_mut() {
            if row.value.user_id == user_id && row.value.mark_read(at) {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use portfoliofy_entity::notification::NotificationKind;

    use super::*;

    async fn seed(store: &MemoryStore, user: Uuid, kind: NotificationKind) -> Notification {
        store
            .create(NewNotification::new(user, kind, "title", "message"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_mark_all_read_only_touches_owner() {
        let store = MemoryStore::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        seed(&store, alice, NotificationKind::AccessRequest).await;
        seed(&store, alice, NotificationKind::PortfolioView).await;
        seed(&store, bob, NotificationKind::SystemAlert).await;

        assert_eq!(store.mark_all_read(alice, Utc::now()).await.unwrap(), 2);
        assert_eq!(store.count_unread(alice).await.unwrap(), 0);
        assert_eq!(store.count_unread(bob).await.unwrap(), 1);
        assert_eq!(store.mark_all_read(alice, Utc::now()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_applies_filter_and_page() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        seed(&store, user, NotificationKind::AccessGranted).await;
        seed(&store, user, NotificationKind::PortfolioView).await;
        let newest = seed(&store, user, NotificationKind::AccessDenied).await;

        let access = store
            .list_for_user(user, NotificationFilter::Access, None)
            .await
            .unwrap();
        assert_eq!(access.len(), 2);
        assert_eq!(access[0].id, newest.id);

        let first_page = store
            .list_for_user(user, NotificationFilter::All, Some(PageRequest::new(1, 1)))
            .await
            .unwrap();
        assert_eq!(first_page.len(), 1);
        assert_eq!(first_page[0].id, newest.id);
    }
}
