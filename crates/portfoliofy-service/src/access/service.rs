//! Access-request lifecycle: create, decide, and list.
//!
//! A request moves Pending → Approved or Pending → Rejected exactly once.
//! Ownership is checked before state so a non-owner always gets an
//! authorization error, never a hint about the request's status. The
//! decision itself is a status-guarded write in the store, so only one of
//! two concurrent decisions can win.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use portfoliofy_core::config::AccessConfig;
use portfoliofy_core::error::AppError;
use portfoliofy_core::events::{AccessRequestEvent, DomainEvent, EventBus, EventPayload};
use portfoliofy_database::store::{AccessRequestStore, PortfolioStore, UserStore};
use portfoliofy_entity::access_request::{
    AccessRequest, AccessRequestStatus, CreateAccessRequest, Decision,
};
use portfoliofy_entity::portfolio::Portfolio;

use crate::context::RequestContext;
use crate::notification::{NotificationService, messages};

/// Orchestrates the access-request workflow.
#[derive(Debug, Clone)]
pub struct AccessRequestService {
    requests: Arc<dyn AccessRequestStore>,
    portfolios: Arc<dyn PortfolioStore>,
    users: Arc<dyn UserStore>,
    notifications: Arc<NotificationService>,
    bus: EventBus,
    config: AccessConfig,
}

impl AccessRequestService {
    /// Creates a new access-request service.
    pub fn new(
        requests: Arc<dyn AccessRequestStore>,
        portfolios: Arc<dyn PortfolioStore>,
        users: Arc<dyn UserStore>,
        notifications: Arc<NotificationService>,
        bus: EventBus,
        config: AccessConfig,
    ) -> Self {
        Self {
            requests,
            portfolios,
            users,
            notifications,
            bus,
            config,
        }
    }

    /// Ask the owner of `portfolio_id` for access.
    #[instrument(skip(self, ctx, message), fields(requester_id = %ctx.user_id))]
    pub async fn create(
        &self,
        ctx: &RequestContext,
        portfolio_id: Uuid,
        message: Option<String>,
    ) -> Result<AccessRequest, AppError> {
        let message = normalize(message);
        check_length("Message", message.as_deref(), self.config.message_max_length)?;

        let portfolio = self.find_portfolio(portfolio_id).await?;
        if portfolio.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden(
                "You cannot request access to your own portfolio",
            ));
        }

        if let Some(active) = self.requests.find_active(portfolio_id, ctx.user_id).await? {
            return Err(match active.status {
                AccessRequestStatus::Approved => {
                    AppError::conflict("You already have access to this portfolio")
                }
                _ => AppError::conflict("An access request for this portfolio is already pending"),
            });
        }

        let request = self
            .requests
            .create(CreateAccessRequest {
                portfolio_id,
                requester_id: ctx.user_id,
                message,
            })
            .await?;

        info!(request_id = %request.id, portfolio_id = %portfolio_id, "Access request created");
        self.publish(
            ctx,
            AccessRequestEvent::Created {
                request_id: request.id,
                portfolio_id,
                requester_id: ctx.user_id,
            },
        );

        let requester_name = self.display_name(ctx.user_id, &ctx.username).await;
        self.notifications
            .notify_best_effort(messages::access_requested(
                &portfolio,
                &request,
                &requester_name,
            ))
            .await;

        Ok(request)
    }

    /// Grant access. Only the portfolio owner may approve.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        note: Option<String>,
    ) -> Result<AccessRequest, AppError> {
        self.decide(ctx, request_id, Decision::Approve, note).await
    }

    /// Refuse access. Only the portfolio owner may reject.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        note: Option<String>,
    ) -> Result<AccessRequest, AppError> {
        self.decide(ctx, request_id, Decision::Reject, note).await
    }

    #[instrument(skip(self, ctx, note), fields(owner_id = %ctx.user_id))]
    async fn decide(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        decision: Decision,
        note: Option<String>,
    ) -> Result<AccessRequest, AppError> {
        let request = self.find_request(request_id).await?;
        let portfolio = self.find_portfolio(request.portfolio_id).await?;

        if !portfolio.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the portfolio owner can decide on access requests",
            ));
        }

        let note = normalize(note);
        check_length("Note", note.as_deref(), self.config.note_max_length)?;

        let decided = self
            .requests
            .decide(request_id, decision, note, Utc::now())
            .await?;

        info!(
            request_id = %decided.id,
            requester_id = %decided.requester_id,
            status = %decided.status,
            "Access request {}",
            decision.verb()
        );

        let event = match decision {
            Decision::Approve => AccessRequestEvent::Approved {
                request_id,
                portfolio_id: decided.portfolio_id,
                requester_id: decided.requester_id,
            },
            Decision::Reject => AccessRequestEvent::Rejected {
                request_id,
                portfolio_id: decided.portfolio_id,
                requester_id: decided.requester_id,
            },
        };
        self.publish(ctx, event);

        let owner_name = self.display_name(ctx.user_id, &ctx.username).await;
        if let Some(notification) = messages::access_decided(&portfolio, &decided, &owner_name) {
            self.notifications.notify_best_effort(notification).await;
        }

        Ok(decided)
    }

    /// Requests across every portfolio the caller owns, newest first.
    pub async fn list_received(&self, ctx: &RequestContext) -> Result<Vec<AccessRequest>, AppError> {
        self.requests.list_received(ctx.user_id).await
    }

    /// Requests the caller has made, newest first.
    pub async fn list_sent(&self, ctx: &RequestContext) -> Result<Vec<AccessRequest>, AppError> {
        self.requests.list_sent(ctx.user_id).await
    }

    /// One request, visible to its requester and the portfolio owner.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> Result<AccessRequest, AppError> {
        let request = self.find_request(request_id).await?;
        if request.requester_id == ctx.user_id {
            return Ok(request);
        }
        let portfolio = self.find_portfolio(request.portfolio_id).await?;
        if portfolio.is_owned_by(ctx.user_id) {
            Ok(request)
        } else {
            Err(AppError::forbidden("You cannot view this access request"))
        }
    }

    /// The caller's most recent request for a portfolio, if any.
    pub async fn status_for(
        &self,
        ctx: &RequestContext,
        portfolio_id: Uuid,
    ) -> Result<Option<AccessRequest>, AppError> {
        self.find_portfolio(portfolio_id).await?;
        self.requests.find_latest(portfolio_id, ctx.user_id).await
    }

    /// Every request, optionally for one portfolio. Administrative use.
    pub async fn list_all(&self, portfolio_id: Option<Uuid>) -> Result<Vec<AccessRequest>, AppError> {
        self.requests.list_all(portfolio_id).await
    }

    async fn find_request(&self, id: Uuid) -> Result<AccessRequest, AppError> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Access request not found"))
    }

    async fn find_portfolio(&self, id: Uuid) -> Result<Portfolio, AppError> {
        self.portfolios
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Portfolio not found"))
    }

    /// Display name for notification text. Falls back to the token's
    /// username if the lookup fails.
    async fn display_name(&self, user_id: Uuid, fallback: &str) -> String {
        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => user.display_name().to_string(),
            _ => fallback.to_string(),
        }
    }

    fn publish(&self, ctx: &RequestContext, event: AccessRequestEvent) {
        self.bus.publish(DomainEvent::new(
            Some(ctx.user_id),
            EventPayload::AccessRequest(event),
        ));
    }
}

/// Trim free text; blank becomes `None`.
fn normalize(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::DateTime;

    use portfoliofy_core::error::ErrorKind;
    use portfoliofy_core::result::AppResult;
    use portfoliofy_core::types::PageRequest;
    use portfoliofy_database::store::NotificationStore;
    use portfoliofy_database::{MemoryStore, Stores};
    use portfoliofy_entity::notification::{
        NewNotification, Notification, NotificationFilter, NotificationKind,
    };
    use portfoliofy_entity::portfolio::{Section, VisibilityUpdate};

    use super::*;
    use crate::testing::Harness;

    async fn notifications_of(
        h: &Harness,
        ctx: &RequestContext,
    ) -> Vec<portfoliofy_entity::notification::Notification> {
        h.services
            .notifications
            .list_for_user(ctx, NotificationFilter::All, None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_pending_request_notifies_owner() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;

        let request = h
            .services
            .access_requests
            .create(&bob, portfolio.id, Some("please".into()))
            .await
            .unwrap();

        assert_eq!(request.status, AccessRequestStatus::Pending);
        assert_eq!(request.portfolio_id, portfolio.id);
        assert_eq!(request.requester_id, bob.user_id);
        assert!(request.decided_at.is_none());

        let owner_inbox = notifications_of(&h, &alice).await;
        assert_eq!(owner_inbox.len(), 1);
        assert_eq!(owner_inbox[0].kind, NotificationKind::AccessRequest);
        assert_eq!(owner_inbox[0].access_request_id, Some(request.id));
        assert!(notifications_of(&h, &bob).await.is_empty());
    }

    #[tokio::test]
    async fn test_approve_grants_every_section_and_notifies_requester() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let portfolio = h
            .services
            .portfolios
            .update_visibility(
                &alice,
                portfolio.id,
                VisibilityUpdate {
                    is_skills_public: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let svc = &h.services.access_requests;
        let request = svc.create(&bob, portfolio.id, Some("please".into())).await.unwrap();

        let approved = svc
            .approve(&alice, request.id, Some("welcome".into()))
            .await
            .unwrap();
        assert_eq!(approved.status, AccessRequestStatus::Approved);
        assert_eq!(approved.response_note.as_deref(), Some("welcome"));
        assert!(approved.decided_at.unwrap() >= approved.created_at);

        let inbox = notifications_of(&h, &bob).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::AccessGranted);

        assert!(
            h.services
                .visibility
                .can_view_section(&portfolio, bob.viewer(), Section::Skills)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_reject_after_approve_is_invalid_state_and_unchanged() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;
        let request = svc.create(&bob, portfolio.id, None).await.unwrap();
        let approved = svc.approve(&alice, request.id, None).await.unwrap();

        let err = svc
            .reject(&alice, request.id, Some("changed my mind".into()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
        assert_eq!(err.kind.code(), "ALREADY_DECIDED");

        let stored = svc.get(&alice, request.id).await.unwrap();
        assert_eq!(stored, approved);
        // Only the approval notified Bob.
        assert_eq!(notifications_of(&h, &bob).await.len(), 1);
    }

    #[tokio::test]
    async fn test_reject_notifies_access_denied() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;
        let request = svc.create(&bob, portfolio.id, None).await.unwrap();

        let rejected = svc.reject(&alice, request.id, None).await.unwrap();
        assert_eq!(rejected.status, AccessRequestStatus::Rejected);
        assert!(rejected.decided_at.is_some());

        let inbox = notifications_of(&h, &bob).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::AccessDenied);
        assert!(
            !h.services
                .visibility
                .has_approved_access(&portfolio, bob.viewer())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_non_owner_decision_is_forbidden_even_when_decided() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let (_, carol) = h.user("carol").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;
        let request = svc.create(&bob, portfolio.id, None).await.unwrap();

        for ctx in [&bob, &carol] {
            let err = svc.approve(ctx, request.id, None).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Forbidden);
        }

        svc.reject(&alice, request.id, None).await.unwrap();
        let err = svc.approve(&carol, request.id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_create_guards() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;

        let err = svc.create(&alice, portfolio.id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let err = svc.create(&bob, Uuid::new_v4(), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = svc
            .create(&bob, portfolio.id, Some("x".repeat(501)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        svc.create(&bob, portfolio.id, Some("x".repeat(500)))
            .await
            .unwrap();
        let err = svc.create(&bob, portfolio.id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_length_limits_follow_config() {
        let mut config = portfoliofy_core::config::AppConfig::default();
        config.access.message_max_length = 800;
        config.access.note_max_length = 20;
        let h = Harness::with_config(Stores::in_memory(), &config);
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;

        let request = svc
            .create(&bob, portfolio.id, Some("m".repeat(700)))
            .await
            .unwrap();
        assert_eq!(request.message.map(|m| m.chars().count()), Some(700));

        let err = svc
            .approve(&alice, request.id, Some("n".repeat(21)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_rejected_requester_may_ask_again() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;
        let first = svc.create(&bob, portfolio.id, None).await.unwrap();
        svc.reject(&alice, first.id, None).await.unwrap();

        let second = svc.create(&bob, portfolio.id, None).await.unwrap();
        let latest = svc.status_for(&bob, portfolio.id).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert!(latest.is_pending());
    }

    #[tokio::test]
    async fn test_note_length_checked_after_ownership() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;
        let request = svc.create(&bob, portfolio.id, None).await.unwrap();

        let err = svc
            .approve(&alice, request.id, Some("n".repeat(501)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(svc.get(&alice, request.id).await.unwrap().is_pending());

        let err = svc.approve(&alice, Uuid::new_v4(), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lists_are_scoped_and_newest_first() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let (_, carol) = h.user("carol").await;
        let first = h.portfolio(&alice, false).await;
        let second = h.portfolio(&alice, true).await;
        let svc = &h.services.access_requests;

        let older = svc.create(&bob, first.id, None).await.unwrap();
        let newer = svc.create(&carol, second.id, None).await.unwrap();

        let received: Vec<Uuid> = svc
            .list_received(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(received, vec![newer.id, older.id]);

        let sent = svc.list_sent(&bob).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, older.id);
        assert!(svc.list_received(&bob).await.unwrap().is_empty());

        let err = svc.get(&carol, older.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(svc.get(&bob, older.id).await.unwrap().id, older.id);
    }

    fn drain_access_events(
        rx: &mut tokio::sync::broadcast::Receiver<DomainEvent>,
    ) -> Vec<(Option<Uuid>, AccessRequestEvent)> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let EventPayload::AccessRequest(inner) = event.payload {
                events.push((event.actor_id, inner));
            }
        }
        events
    }

    #[tokio::test]
    async fn test_each_transition_publishes_one_access_event() {
        let h = Harness::new();
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let (_, carol) = h.user("carol").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;
        let mut rx = h.bus.subscribe();

        let granted = svc.create(&bob, portfolio.id, None).await.unwrap();
        let denied = svc.create(&carol, portfolio.id, None).await.unwrap();
        svc.approve(&alice, granted.id, None).await.unwrap();
        svc.reject(&alice, denied.id, None).await.unwrap();
        // A failed decision publishes nothing.
        svc.approve(&alice, denied.id, None).await.unwrap_err();

        let events = drain_access_events(&mut rx);
        assert_eq!(events.len(), 4);
        match &events[0] {
            (Some(actor), AccessRequestEvent::Created { request_id, portfolio_id, requester_id }) => {
                assert_eq!(*actor, bob.user_id);
                assert_eq!(*request_id, granted.id);
                assert_eq!(*portfolio_id, portfolio.id);
                assert_eq!(*requester_id, bob.user_id);
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[1] {
            (_, AccessRequestEvent::Created { requester_id, .. }) => {
                assert_eq!(*requester_id, carol.user_id);
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[2] {
            (Some(actor), AccessRequestEvent::Approved { request_id, portfolio_id, requester_id }) => {
                assert_eq!(*actor, alice.user_id);
                assert_eq!(*request_id, granted.id);
                assert_eq!(*portfolio_id, portfolio.id);
                assert_eq!(*requester_id, bob.user_id);
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[3] {
            (Some(actor), AccessRequestEvent::Rejected { request_id, portfolio_id, requester_id }) => {
                assert_eq!(*actor, alice.user_id);
                assert_eq!(*request_id, denied.id);
                assert_eq!(*portfolio_id, portfolio.id);
                assert_eq!(*requester_id, carol.user_id);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    /// Notification store that refuses every write.
    #[derive(Debug)]
    struct BrokenNotifications;

    #[async_trait]
    impl NotificationStore for BrokenNotifications {
        async fn create(&self, _: NewNotification) -> AppResult<Notification> {
            Err(AppError::service_unavailable("notifications offline"))
        }
        async fn find_by_id(&self, _: Uuid) -> AppResult<Option<Notification>> {
            Ok(None)
        }
        async fn list_for_user(
            &self,
            _: Uuid,
            _: NotificationFilter,
            _: Option<PageRequest>,
        ) -> AppResult<Vec<Notification>> {
            Ok(Vec::new())
        }
        async fn count_unread(&self, _: Uuid) -> AppResult<u64> {
            Ok(0)
        }
        async fn mark_read(&self, id: Uuid, _: DateTime<Utc>) -> AppResult<Notification> {
            Err(AppError::not_found(format!("Notification {id} not found")))
        }
        async fn mark_all_read(&self, _: Uuid, _: DateTime<Utc>) -> AppResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_workflow() {
        let mut stores = Stores::from_memory(Arc::new(MemoryStore::new()));
        stores.notifications = Arc::new(BrokenNotifications);
        let h = Harness::with_stores(stores);
        let (_, alice) = h.user("alice").await;
        let (_, bob) = h.user("bob").await;
        let portfolio = h.portfolio(&alice, false).await;
        let svc = &h.services.access_requests;

        let request = svc.create(&bob, portfolio.id, None).await.unwrap();
        let approved = svc.approve(&alice, request.id, None).await.unwrap();
        assert!(approved.is_approved());
    }
}
