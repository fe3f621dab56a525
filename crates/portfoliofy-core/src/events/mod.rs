//! Domain events emitted by Portfoliofy operations.
//!
//! Events are published on the [`EventBus`] and consumed by the realtime
//! push channel and anything else that wants to observe workflow changes.

pub mod access;
pub mod bus;
pub mod notification;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use access::AccessRequestEvent;
pub use bus::EventBus;
pub use notification::NotificationEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<Uuid>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// An access-request lifecycle event.
    AccessRequest(AccessRequestEvent),
    /// A notification-set change.
    Notification(NotificationEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<Uuid>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// The user whose notification set changed, if this is such an event.
    pub fn notifications_changed_for(&self) -> Option<Uuid> {
        match &self.payload {
            EventPayload::Notification(NotificationEvent::Changed { user_id, .. }) => {
                Some(*user_id)
            }
            _ => None,
        }
    }
}
