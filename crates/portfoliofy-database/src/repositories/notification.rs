//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::result::AppResult;
use portfoliofy_core::types::PageRequest;
use portfoliofy_entity::notification::{NewNotification, Notification, NotificationFilter};

use super::page_bounds;
use crate::error::db_error;
use crate::store::NotificationStore;

/// PostgreSQL notification store.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQL predicate equivalent to [`NotificationFilter::matches`].
fn filter_clause(filter: NotificationFilter) -> &'static str {
    match filter {
        NotificationFilter::All => "",
        NotificationFilter::Unread => " AND NOT is_read",
        NotificationFilter::Read => " AND is_read",
        NotificationFilter::Access => {
            " AND kind IN ('access_request', 'access_granted', 'access_denied')"
        }
        NotificationFilter::PortfolioView => " AND kind = 'portfolio_view'",
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let n = notification.into_notification();
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, user_id, kind, title, message, is_read, \
             portfolio_id, access_request_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $8) RETURNING *",
        )
        .bind(n.id)
        .bind(n.user_id)
        .bind(n.kind)
        .bind(&n.title)
        .bind(&n.message)
        .bind(n.portfolio_id)
        .bind(n.access_request_id)
        .bind(n.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create notification", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find notification", e))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<Notification>> {
        let (limit, offset) = page_bounds(page);
        let sql = format!(
            "SELECT * FROM notifications WHERE user_id = $1{} \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
            filter_clause(filter)
        );
        sqlx::query_as::<_, Notification>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list notifications", e))
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count unread notifications", e))?;
        Ok(count.max(0) as u64)
    }

    async fn mark_read(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE, read_at = COALESCE(read_at, $2) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark notification read", e))?
        .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    async fn mark_all_read(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 \
             WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark all notifications read", e))?;
        Ok(result.rows_affected())
    }
}
