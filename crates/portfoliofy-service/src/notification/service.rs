//! Notification creation, listing, and read state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::events::notification::ChangeReason;
use portfoliofy_core::events::{DomainEvent, EventBus, EventPayload, NotificationEvent};
use portfoliofy_core::types::PageRequest;
use portfoliofy_database::store::NotificationStore;
use portfoliofy_entity::notification::{NewNotification, Notification, NotificationFilter};

use crate::context::RequestContext;

/// Creates notifications and manages their read state.
///
/// Every change to a user's notification set publishes a
/// `NotificationEvent::Changed` on the event bus.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Event bus for change announcements.
    bus: EventBus,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, bus: EventBus) -> Self {
        Self { store, bus }
    }

    /// Create an unread notification. Not deduplicated.
    pub async fn notify(&self, notification: NewNotification) -> Result<Notification, AppError> {
        let created = self.store.create(notification).await?;
        info!(
            notification_id = %created.id,
            user_id = %created.user_id,
            kind = %created.kind,
            "Notification created"
        );
        self.publish_changed(created.user_id, ChangeReason::Created);
        Ok(created)
    }

    /// Create a notification as a side effect. Failures are logged and
    /// swallowed so the calling workflow's result stands.
    pub async fn notify_best_effort(&self, notification: NewNotification) -> Option<Notification> {
        let user_id = notification.user_id;
        let kind = notification.kind;
        match self.notify(notification).await {
            Ok(created) => Some(created),
            Err(e) => {
                warn!(user_id = %user_id, kind = %kind, error = %e, "Failed to create notification");
                None
            }
        }
    }

    /// List the caller's notifications, newest first.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        filter: NotificationFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Notification>, AppError> {
        self.store.list_for_user(ctx.user_id, filter, page).await
    }

    /// Number of unread notifications for the caller.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.store.count_unread(ctx.user_id).await
    }

    /// Mark one of the caller's notifications read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<Notification, AppError> {
        let existing = self
            .store
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if existing.user_id != ctx.user_id {
            return Err(AppError::forbidden(
                "You can only modify your own notifications",
            ));
        }
        if existing.is_read {
            debug!(notification_id = %notification_id, "Notification already read");
            return Ok(existing);
        }

        let updated = self.store.mark_read(notification_id, Utc::now()).await?;
        self.publish_changed(ctx.user_id, ChangeReason::Read);
        Ok(updated)
    }

    /// Mark every unread notification of the caller read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        let changed = self.store.mark_all_read(ctx.user_id, Utc::now()).await?;
        info!(user_id = %ctx.user_id, changed, "Marked all notifications read");
        self.publish_changed(ctx.user_id, ChangeReason::Read);
        Ok(changed)
    }

    fn publish_changed(&self, user_id: Uuid, reason: ChangeReason) {
        self.bus.publish(DomainEvent::new(
            Some(user_id),
            EventPayload::Notification(NotificationEvent::Changed { user_id, reason }),
        ));
    }
}
