//! In-process publish/subscribe bus for domain events.

use tokio::sync::broadcast;
use tracing::trace;

use super::DomainEvent;

/// Fan-out channel for [`DomainEvent`]s.
///
/// Publishing never blocks and never fails: with no subscribers the event
/// is dropped, and slow subscribers observe `RecvError::Lagged`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to every current subscriber.
    pub fn publish(&self, event: DomainEvent) {
        match self.sender.send(event) {
            Ok(receivers) => trace!(receivers, "Domain event published"),
            Err(_) => trace!("Domain event dropped, no subscribers"),
        }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
