//! Notification text for each workflow event.

use portfoliofy_entity::access_request::{AccessRequest, AccessRequestStatus};
use portfoliofy_entity::notification::{NewNotification, NotificationKind};
use portfoliofy_entity::portfolio::Portfolio;

/// Tell the owner someone asked to see their portfolio.
pub fn access_requested(
    portfolio: &Portfolio,
    request: &AccessRequest,
    requester_name: &str,
) -> NewNotification {
    let mut message = format!(
        "{requester_name} requested access to your portfolio \"{}\".",
        portfolio.title
    );
    if let Some(note) = &request.message {
        message.push_str(&format!(" Message: {note}"));
    }
    NewNotification::new(
        portfolio.owner_id,
        NotificationKind::AccessRequest,
        "New access request",
        message,
    )
    .with_portfolio(portfolio.id)
    .with_access_request(request.id)
}

/// Tell the requester how the owner decided. Returns `None` for a request
/// that is still pending.
pub fn access_decided(
    portfolio: &Portfolio,
    request: &AccessRequest,
    owner_name: &str,
) -> Option<NewNotification> {
    let (kind, title, verb) = match request.status {
        AccessRequestStatus::Pending => return None,
        AccessRequestStatus::Approved => {
            (NotificationKind::AccessGranted, "Access granted", "approved")
        }
        AccessRequestStatus::Rejected => {
            (NotificationKind::AccessDenied, "Access request declined", "declined")
        }
    };
    let mut message = format!(
        "{owner_name} {verb} your request to view \"{}\".",
        portfolio.title
    );
    if let Some(note) = &request.response_note {
        message.push_str(&format!(" Note: {note}"));
    }
    Some(
        NewNotification::new(request.requester_id, kind, title, message)
            .with_portfolio(portfolio.id)
            .with_access_request(request.id),
    )
}

/// Tell the owner their portfolio was viewed.
pub fn portfolio_viewed(portfolio: &Portfolio, viewer_label: &str) -> NewNotification {
    NewNotification::new(
        portfolio.owner_id,
        NotificationKind::PortfolioView,
        "Portfolio viewed",
        format!("{viewer_label} viewed your portfolio \"{}\".", portfolio.title),
    )
    .with_portfolio(portfolio.id)
}
