//! Access-request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use portfoliofy_core::error::AppError;

use super::status::{AccessRequestStatus, Decision};

/// A request by one user to view another user's private portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AccessRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The portfolio access is requested for.
    pub portfolio_id: Uuid,
    /// The requesting user.
    pub requester_id: Uuid,
    /// Current lifecycle state.
    pub status: AccessRequestStatus,
    /// Message from the requester.
    pub message: Option<String>,
    /// Note from the owner attached to the decision.
    pub response_note: Option<String>,
    /// When the request was made.
    pub created_at: DateTime<Utc>,
    /// When the owner decided. `None` while pending.
    pub decided_at: Option<DateTime<Utc>>,
}

impl AccessRequest {
    /// Whether the request is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        self.status == AccessRequestStatus::Pending
    }

    /// Whether the request is a standing grant.
    pub fn is_approved(&self) -> bool {
        self.status == AccessRequestStatus::Approved
    }

    /// Apply a decision in place.
    ///
    /// Fails with an invalid-state error, leaving `self` untouched, unless
    /// the request is pending.
    pub fn decide(
        &mut self,
        decision: Decision,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if self.status.is_decided() {
            return Err(AppError::invalid_state(format!(
                "Access request has already been {}",
                self.status
            )));
        }
        self.status = decision.target_status();
        self.response_note = note;
        self.decided_at = Some(at.max(self.created_at));
        Ok(())
    }
}

/// Data required to create a new access request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccessRequest {
    /// Target portfolio.
    pub portfolio_id: Uuid,
    /// Requesting user.
    pub requester_id: Uuid,
    /// Optional message to the owner.
    pub message: Option<String>,
}

impl CreateAccessRequest {
    /// Materialize a new pending request.
    pub fn into_request(self) -> AccessRequest {
        AccessRequest {
            id: Uuid::new_v4(),
            portfolio_id: self.portfolio_id,
            requester_id: self.requester_id,
            status: AccessRequestStatus::Pending,
            message: self.message,
            response_note: None,
            created_at: Utc::now(),
            decided_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use portfoliofy_core::error::ErrorKind;

    use super::*;

    fn pending() -> AccessRequest {
        CreateAccessRequest {
            portfolio_id: Uuid::new_v4(),
            requester_id: Uuid::new_v4(),
            message: Some("please".to_string()),
        }
        .into_request()
    }

    #[test]
    fn test_new_request_is_pending_and_undecided() {
        let req = pending();
        assert!(req.is_pending());
        assert!(req.decided_at.is_none());
        assert!(!req.status.is_decided());
        assert!(req.status.blocks_new_request());
    }

    #[test]
    fn test_approve_sets_decision_timestamp() {
        let mut req = pending();
        req.decide(Decision::Approve, Some("welcome".to_string()), Utc::now())
            .expect("approve");
        assert!(req.is_approved());
        assert_eq!(req.response_note.as_deref(), Some("welcome"));
        assert!(req.decided_at.expect("decided") >= req.created_at);
    }

    #[test]
    fn test_decided_at_never_precedes_created_at() {
        let mut req = pending();
        let skewed = req.created_at - Duration::seconds(30);
        req.decide(Decision::Reject, None, skewed).expect("reject");
        assert_eq!(req.decided_at, Some(req.created_at));
    }

    #[test]
    fn test_terminal_states_refuse_further_decisions() {
        for first in [Decision::Approve, Decision::Reject] {
            let mut req = pending();
            req.decide(first, None, Utc::now()).expect("first decision");
            assert!(req.status.is_decided());
            let snapshot = req.clone();
            for second in [Decision::Approve, Decision::Reject] {
                let err = req
                    .decide(second, Some("again".to_string()), Utc::now())
                    .expect_err("must fail");
                assert_eq!(err.kind, ErrorKind::InvalidState);
                assert_eq!(req, snapshot);
            }
        }
    }

    #[test]
    fn test_rejected_does_not_block_new_request() {
        assert!(!AccessRequestStatus::Rejected.blocks_new_request());
        assert!(AccessRequestStatus::Approved.blocks_new_request());
    }
}
