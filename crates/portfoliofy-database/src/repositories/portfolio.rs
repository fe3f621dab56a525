//! Portfolio repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use portfoliofy_core::result::AppResult;
use portfoliofy_core::types::PageRequest;
use portfoliofy_entity::portfolio::{CreatePortfolio, Portfolio};

use super::page_bounds;
use crate::error::db_error;
use crate::store::PortfolioStore;

/// PostgreSQL portfolio store.
#[derive(Debug, Clone)]
pub struct PortfolioRepository {
    pool: PgPool,
}

impl PortfolioRepository {
    /// Create a new portfolio repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioStore for PortfolioRepository {
    async fn create(&self, portfolio: CreatePortfolio) -> AppResult<Portfolio> {
        let p = portfolio.into_portfolio();
        sqlx::query_as::<_, Portfolio>(
            "INSERT INTO portfolios (id, owner_id, title, description, is_public, \
             is_projects_public, is_education_public, is_experience_public, is_skills_public, \
             is_social_media_public, contact_email, contact_phone, city, country, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) RETURNING *",
        )
        .bind(p.id)
        .bind(p.owner_id)
        .bind(&p.title)
        .bind(&p.description)
        .bind(p.is_public)
        .bind(p.is_projects_public)
        .bind(p.is_education_public)
        .bind(p.is_experience_public)
        .bind(p.is_skills_public)
        .bind(p.is_social_media_public)
        .bind(&p.contact_email)
        .bind(&p.contact_phone)
        .bind(&p.city)
        .bind(&p.country)
        .bind(p.created_at)
        .bind(p.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create portfolio", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Portfolio>> {
        sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find portfolio", e))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Portfolio>> {
        sqlx::query_as::<_, Portfolio>(
            "SELECT * FROM portfolios WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list portfolios by owner", e))
    }

    async fn list_public(&self, page: Option<PageRequest>) -> AppResult<Vec<Portfolio>> {
        let (limit, offset) = page_bounds(page);
        sqlx::query_as::<_, Portfolio>(
            "SELECT * FROM portfolios WHERE is_public \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list public portfolios", e))
    }

    async fn update(&self, p: &Portfolio) -> AppResult<Portfolio> {
        sqlx::query_as::<_, Portfolio>(
            "UPDATE portfolios SET title = $2, description = $3, is_public = $4, \
             is_projects_public = $5, is_education_public = $6, is_experience_public = $7, \
             is_skills_public = $8, is_social_media_public = $9, contact_email = $10, \
             contact_phone = $11, city = $12, country = $13, updated_at = $14 \
             WHERE id = $1 RETURNING *",
        )
        .bind(p.id)
        .bind(&p.title)
        .bind(&p.description)
        .bind(p.is_public)
        .bind(p.is_projects_public)
        .bind(p.is_education_public)
        .bind(p.is_experience_public)
        .bind(p.is_skills_public)
        .bind(p.is_social_media_public)
        .bind(&p.contact_email)
        .bind(&p.contact_phone)
        .bind(&p.city)
        .bind(&p.country)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update portfolio", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete portfolio", e))?;
        debug!(portfolio_id = %id, rows = result.rows_affected(), "Deleted portfolio");
        Ok(result.rows_affected() > 0)
    }
}
