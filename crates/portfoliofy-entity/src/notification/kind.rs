//! Notification kind enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portfoliofy_core::error::AppError;

/// Closed set of notification kinds.
///
/// Unrecognized kinds are rejected when parsed rather than mapped to a
/// catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone asked to see one of the recipient's portfolios.
    AccessRequest,
    /// The recipient's access request was approved.
    AccessGranted,
    /// The recipient's access request was rejected.
    AccessDenied,
    /// Someone viewed one of the recipient's portfolios.
    PortfolioView,
    /// A system-wide message.
    SystemAlert,
    /// A direct message.
    NewMessage,
}

impl NotificationKind {
    /// Every kind.
    pub const ALL: [NotificationKind; 6] = [
        NotificationKind::AccessRequest,
        NotificationKind::AccessGranted,
        NotificationKind::AccessDenied,
        NotificationKind::PortfolioView,
        NotificationKind::SystemAlert,
        NotificationKind::NewMessage,
    ];

    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessRequest => "access_request",
            Self::AccessGranted => "access_granted",
            Self::AccessDenied => "access_denied",
            Self::PortfolioView => "portfolio_view",
            Self::SystemAlert => "system_alert",
            Self::NewMessage => "new_message",
        }
    }

    /// Whether this kind belongs to the access-request workflow.
    pub fn is_access_related(&self) -> bool {
        matches!(
            self,
            Self::AccessRequest | Self::AccessGranted | Self::AccessDenied
        )
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = AppError;

    /// Accepts both `snake_case` and `PascalCase` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().replace('_', "") == normalized)
            .ok_or_else(|| AppError::validation(format!("Unknown notification kind: {s}")))
    }
}
