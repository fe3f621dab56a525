//! Store traits implemented by every persistence backend.
//!
//! Services hold these as `Arc<dyn …>` so the PostgreSQL repositories and
//! the in-memory store are interchangeable. Every implementation must
//! provide the same guarantees: unique usernames and emails, at most one
//! pending-or-approved access request per (portfolio, requester), and an
//! atomic status-guarded decision.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use portfoliofy_core::result::AppResult;
use portfoliofy_core::types::PageRequest;
use portfoliofy_entity::access_request::{AccessRequest, CreateAccessRequest, Decision};
use portfoliofy_entity::notification::{NewNotification, Notification, NotificationFilter};
use portfoliofy_entity::portfolio::{CreatePortfolio, Portfolio};
use portfoliofy_entity::user::{CreateUser, User};
use portfoliofy_entity::view_log::{NewViewLog, PortfolioViewLog};

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a user. Fails with `Conflict` if the username or email is
    /// taken (case-insensitive).
    async fn create(&self, user: CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// List every user, newest first.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Portfolio persistence.
#[async_trait]
pub trait PortfolioStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a portfolio.
    async fn create(&self, portfolio: CreatePortfolio) -> AppResult<Portfolio>;

    /// Find a portfolio by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Portfolio>>;

    /// Portfolios owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Portfolio>>;

    /// Public portfolios, newest first.
    async fn list_public(&self, page: Option<PageRequest>) -> AppResult<Vec<Portfolio>>;

    /// Persist every mutable field of `portfolio` and bump `updated_at`.
    async fn update(&self, portfolio: &Portfolio) -> AppResult<Portfolio>;

    /// Delete a portfolio with its access requests and view logs, and
    /// detach notifications that referenced it. Returns `false` if it did
    /// not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Access-request persistence.
#[async_trait]
pub trait AccessRequestStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a pending request. Fails with `Conflict` if the pair already
    /// has a pending or approved request.
    async fn create(&self, request: CreateAccessRequest) -> AppResult<AccessRequest>;

    /// Find a request by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccessRequest>>;

    /// The pair's pending or approved request, if any.
    async fn find_active(
        &self,
        portfolio_id: Uuid,
        requester_id: Uuid,
    ) -> AppResult<Option<AccessRequest>>;

    /// The pair's most recent request in any state.
    async fn find_latest(
        &self,
        portfolio_id: Uuid,
        requester_id: Uuid,
    ) -> AppResult<Option<AccessRequest>>;

    /// Whether the pair holds an approved request.
    async fn has_approved(&self, portfolio_id: Uuid, requester_id: Uuid) -> AppResult<bool>;

    /// Move a pending request to its decided state.
    ///
    /// The write only succeeds while the stored status is still pending;
    /// otherwise it fails with `InvalidState` and the record is unchanged.
    /// Fails with `NotFound` if the request does not exist.
    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<AccessRequest>;

    /// Requests targeting any portfolio owned by `owner_id`, newest first.
    async fn list_received(&self, owner_id: Uuid) -> AppResult<Vec<AccessRequest>>;

    /// Requests made by `requester_id`, newest first.
    async fn list_sent(&self, requester_id: Uuid) -> AppResult<Vec<AccessRequest>>;

    /// Every request, optionally narrowed to one portfolio, newest first.
    async fn list_all(&self, portfolio_id: Option<Uuid>) -> AppResult<Vec<AccessRequest>>;
}

/// Notification persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert an unread notification.
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;

    /// Find a notification by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// A user's notifications matching `filter`, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<Notification>>;

    /// Number of unread notifications for a user.
    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64>;

    /// Mark one notification read. A notification that is already read
    /// keeps its original `read_at`.
    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Notification>;

    /// Mark every unread notification of a user read. Returns how many
    /// changed.
    async fn mark_all_read(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<u64>;
}

/// Portfolio view log persistence.
#[async_trait]
pub trait ViewLogStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append a view log entry.
    async fn record(&self, view: NewViewLog) -> AppResult<PortfolioViewLog>;

    /// Views of a portfolio, newest first.
    async fn list_for_portfolio(
        &self,
        portfolio_id: Uuid,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<PortfolioViewLog>>;
}
