//! Read-only views over a user's notification list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portfoliofy_core::error::AppError;

use super::model::Notification;

/// Filter applied when listing notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFilter {
    /// Everything.
    #[default]
    All,
    /// Unread only.
    Unread,
    /// Read only.
    Read,
    /// Access-request workflow notifications.
    Access,
    /// Portfolio view notifications.
    PortfolioView,
}

impl NotificationFilter {
    /// Whether `notification` passes this filter.
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.is_read,
            Self::Read => notification.is_read,
            Self::Access => notification.kind.is_access_related(),
            Self::PortfolioView => {
                notification.kind == super::kind::NotificationKind::PortfolioView
            }
        }
    }
}

impl FromStr for NotificationFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "access" => Ok(Self::Access),
            "portfolio_view" | "views" => Ok(Self::PortfolioView),
            other => Err(AppError::validation(format!(
                "Unknown notification filter: {other}"
            ))),
        }
    }
}
