//! Access-request lifecycle events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted as an access request moves through its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessRequestEvent {
    /// A viewer asked for access to a private portfolio.
    Created {
        /// The access request ID.
        request_id: Uuid,
        /// The target portfolio.
        portfolio_id: Uuid,
        /// The requesting user.
        requester_id: Uuid,
    },
    /// The owner approved the request.
    Approved {
        /// The access request ID.
        request_id: Uuid,
        /// The target portfolio.
        portfolio_id: Uuid,
        /// The requesting user.
        requester_id: Uuid,
    },
    /// The owner rejected the request.
    Rejected {
        /// The access request ID.
        request_id: Uuid,
        /// The target portfolio.
        portfolio_id: Uuid,
        /// The requesting user.
        requester_id: Uuid,
    },
}
