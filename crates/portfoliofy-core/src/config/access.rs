//! Access-request workflow limits.

use serde::{Deserialize, Serialize};

/// Bounds applied to free-text fields of access requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Maximum length (in characters) of a requester's message.
    #[serde(default = "default_max_length")]
    pub message_max_length: usize,
    /// Maximum length (in characters) of an owner's response note.
    #[serde(default = "default_max_length")]
    pub note_max_length: usize,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            message_max_length: default_max_length(),
            note_max_length: default_max_length(),
        }
    }
}

fn default_max_length() -> usize {
    500
}
