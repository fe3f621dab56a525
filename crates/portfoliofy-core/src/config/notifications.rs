//! Notification engine configuration.

use serde::{Deserialize, Serialize};

/// Notification delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Capacity of the in-process change-event channel.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Whether non-owner portfolio views notify the owner.
    #[serde(default = "default_true")]
    pub notify_on_view: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            notify_on_view: true,
        }
    }
}

fn default_channel_capacity() -> usize {
    256
}

fn default_true() -> bool {
    true
}
