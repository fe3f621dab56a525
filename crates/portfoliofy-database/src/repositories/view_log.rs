//! Portfolio view log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use portfoliofy_core::result::AppResult;
use portfoliofy_core::types::PageRequest;
use portfoliofy_entity::view_log::{NewViewLog, PortfolioViewLog};

use super::page_bounds;
use crate::error::db_error;
use crate::store::ViewLogStore;

/// PostgreSQL view log store.
#[derive(Debug, Clone)]
pub struct ViewLogRepository {
    pool: PgPool,
}

impl ViewLogRepository {
    /// Create a new view log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewLogStore for ViewLogRepository {
    async fn record(&self, view: NewViewLog) -> AppResult<PortfolioViewLog> {
        let v = view.into_log();
        sqlx::query_as::<_, PortfolioViewLog>(
            "INSERT INTO portfolio_view_logs (id, portfolio_id, viewer_id, viewer_name, \
             viewer_email, viewer_phone, viewed_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(v.id)
        .bind(v.portfolio_id)
        .bind(v.viewer_id)
        .bind(&v.viewer_name)
        .bind(&v.viewer_email)
        .bind(&v.viewer_phone)
        .bind(v.viewed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record portfolio view", e))
    }

    async fn list_for_portfolio(
        &self,
        portfolio_id: Uuid,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<PortfolioViewLog>> {
        let (limit, offset) = page_bounds(page);
        sqlx::query_as::<_, PortfolioViewLog>(
            "SELECT * FROM portfolio_view_logs WHERE portfolio_id = $1 \
             ORDER BY viewed_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(portfolio_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list portfolio views", e))
    }
}
