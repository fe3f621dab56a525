//! Access-request status and the decisions that move it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portfoliofy_core::error::AppError;

/// Lifecycle state of an access request.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "access_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessRequestStatus {
    /// Awaiting the owner's decision.
    Pending,
    /// The owner granted access.
    Approved,
    /// The owner refused access.
    Rejected,
}

impl AccessRequestStatus {
    /// Whether a decision has been made.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether a request in this state blocks a new request for the same
    /// (portfolio, requester) pair.
    pub fn blocks_new_request(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AccessRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessRequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(AppError::validation(format!(
                "Unknown access request status: {other}"
            ))),
        }
    }
}

/// An owner's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Grant access.
    Approve,
    /// Refuse access.
    Reject,
}

impl Decision {
    /// The terminal status this decision leads to.
    pub fn target_status(&self) -> AccessRequestStatus {
        match self {
            Self::Approve => AccessRequestStatus::Approved,
            Self::Reject => AccessRequestStatus::Rejected,
        }
    }

    /// Past-tense verb for log and notification text.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
        }
    }
}
