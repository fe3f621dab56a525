//! Access-request repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::result::AppResult;
use portfoliofy_entity::access_request::{
    AccessRequest, AccessRequestStatus, CreateAccessRequest, Decision,
};

use crate::error::db_error;
use crate::store::AccessRequestStore;

/// PostgreSQL access-request store.
///
/// The one-active-request rule is enforced by the
/// `access_requests_active_pair_idx` partial unique index; a violation
/// surfaces as `Conflict`.
#[derive(Debug, Clone)]
pub struct AccessRequestRepository {
    pool: PgPool,
}

impl AccessRequestRepository {
    /// Create a new access-request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessRequestStore for AccessRequestRepository {
    async fn create(&self, request: CreateAccessRequest) -> AppResult<AccessRequest> {
        let r = request.into_request();
        sqlx::query_as::<_, AccessRequest>(
            "INSERT INTO access_requests (id, portfolio_id, requester_id, status, message, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(r.id)
        .bind(r.portfolio_id)
        .bind(r.requester_id)
        .bind(r.status)
        .bind(&r.message)
        .bind(r.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create access request", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>("SELECT * FROM access_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find access request", e))
    }

    async fn find_active(
        &self,
        portfolio_id: Uuid,
        requester_id: Uuid,
    ) -> AppResult<Option<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>(
            "SELECT * FROM access_requests \
             WHERE portfolio_id = $1 AND requester_id = $2 AND status IN ('pending', 'approved')",
        )
        .bind(portfolio_id)
        .bind(requester_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find active access request", e))
    }

    async fn find_latest(
        &self,
        portfolio_id: Uuid,
        requester_id: Uuid,
    ) -> AppResult<Option<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>(
            "SELECT * FROM access_requests WHERE portfolio_id = $1 AND requester_id = $2 \
             ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(portfolio_id)
        .bind(requester_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find latest access request", e))
    }

    async fn has_approved(&self, portfolio_id: Uuid, requester_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM access_requests \
             WHERE portfolio_id = $1 AND requester_id = $2 AND status = 'approved')",
        )
        .bind(portfolio_id)
        .bind(requester_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check approved access", e))
    }

    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<AccessRequest> {
        let updated = sqlx::query_as::<_, AccessRequest>(
            "UPDATE access_requests \
             SET status = $2, response_note = $3, decided_at = GREATEST($4, created_at) \
             WHERE id = $1 AND status = $5 RETURNING *",
        )
        .bind(id)
        .bind(decision.target_status())
        .bind(&note)
        .bind(at)
        .bind(AccessRequestStatus::Pending)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to decide access request", e))?;

        if let Some(request) = updated {
            return Ok(request);
        }

        // Lost the race or never pending: distinguish the two.
        match self.find_by_id(id).await? {
            Some(existing) => Err(AppError::invalid_state(format!(
                "Access request has already been {}",
                existing.status
            ))),
            None => Err(AppError::not_found(format!("Access request {id} not found"))),
        }
    }

    async fn list_received(&self, owner_id: Uuid) -> AppResult<Vec<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>(
            "SELECT ar.* FROM access_requests ar \
             JOIN portfolios p ON p.id = ar.portfolio_id \
             WHERE p.owner_id = $1 ORDER BY ar.created_at DESC, ar.id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list received access requests", e))
    }

    async fn list_sent(&self, requester_id: Uuid) -> AppResult<Vec<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>(
            "SELECT * FROM access_requests WHERE requester_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list sent access requests", e))
    }

    async fn list_all(&self, portfolio_id: Option<Uuid>) -> AppResult<Vec<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>(
            "SELECT * FROM access_requests WHERE ($1::uuid IS NULL OR portfolio_id = $1) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(portfolio_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list access requests", e))
    }
}
