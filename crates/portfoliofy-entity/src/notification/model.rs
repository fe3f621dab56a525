//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;

/// A durable, per-user notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// What triggered this notification.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// Related portfolio, if any.
    pub portfolio_id: Option<Uuid>,
    /// Related access request, if any.
    pub access_request_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Mark as read. Already-read notifications keep their original
    /// `read_at`. Returns whether anything changed.
    pub fn mark_read(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(at);
        true
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: Uuid,
    /// Kind.
    pub kind: NotificationKind,
    /// Title.
    pub title: String,
    /// Body.
    pub message: String,
    /// Related portfolio.
    pub portfolio_id: Option<Uuid>,
    /// Related access request.
    pub access_request_id: Option<Uuid>,
}

impl NewNotification {
    /// Start a notification for `user_id`.
    pub fn new(
        user_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            portfolio_id: None,
            access_request_id: None,
        }
    }

    /// Attach the related portfolio.
    pub fn with_portfolio(mut self, portfolio_id: Uuid) -> Self {
        self.portfolio_id = Some(portfolio_id);
        self
    }

    /// Attach the related access request.
    pub fn with_access_request(mut self, request_id: Uuid) -> Self {
        self.access_request_id = Some(request_id);
        self
    }

    /// Materialize an unread notification row.
    pub fn into_notification(self) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            is_read: false,
            read_at: None,
            portfolio_id: self.portfolio_id,
            access_request_id: self.access_request_id,
            created_at: Utc::now(),
        }
    }
}
