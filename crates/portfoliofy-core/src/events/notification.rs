//! Notification change events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a user's notification set changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    /// A new notification was stored.
    Created,
    /// One or more notifications were marked read.
    Read,
}

/// Events describing changes to a user's notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// The user's notification list or unread count changed.
    Changed {
        /// The affected user.
        user_id: Uuid,
        /// What happened.
        reason: ChangeReason,
    },
}
