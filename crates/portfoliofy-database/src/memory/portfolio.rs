use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::result::AppResult;
use portfoliofy_core::types::PageRequest;
use portfoliofy_entity::portfolio::{CreatePortfolio, Portfolio};

use super::{MemoryStore, newest_first};
use crate::store::PortfolioStore;

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn create(&self, portfolio: CreatePortfolio) -> AppResult<Portfolio> {
        let portfolio = portfolio.into_portfolio();
        self.portfolios
            .insert(portfolio.id, self.row(portfolio.clone()));
        Ok(portfolio)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Portfolio>> {
        Ok(self.portfolios.get(&id).map(|r| r.value.clone()))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Portfolio>> {
        Ok(newest_first(
            self.portfolios
                .iter()
                .filter(|r| r.value.owner_id == owner_id)
                .map(|r| (r.value.created_at, r.seq, r.value.clone()))
                .collect(),
        ))
    }

    async fn list_public(&self, page: Option<PageRequest>) -> AppResult<Vec<Portfolio>> {
        let all = newest_first(
            self.portfolios
                .iter()
                .filter(|r| r.value.is_public)
                .map(|r| (r.value.created_at, r.seq, r.value.clone()))
                .collect(),
        );
        Ok(match page {
            Some(page) => page.slice(all),
            None => all,
        })
    }

    async fn update(&self, portfolio: &Portfolio) -> AppResult<Portfolio> {
        let mut row = self
            .portfolios
            .get_mut(&portfolio.id)
            .ok_or_else(|| AppError::not_found(format!("Portfolio {} not found", portfolio.id)))?;
        let mut updated = portfolio.clone();
        updated.owner_id = row.value.owner_id;
        updated.created_at = row.value.created_at;
        updated.updated_at = Utc::now();
        row.value = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        if self.portfolios.remove(&id).is_none() {
            return Ok(false);
        }

        let mut removed_requests = Vec::new();
        self.access_requests.retain(|request_id, row| {
            let keep = row.value.portfolio_id != id;
            if !keep {
                removed_requests.push(*request_id);
            }
            keep
        });
        self.active_pairs.retain(|(portfolio_id, _), _| *portfolio_id != id);
        self.view_logs.retain(|_, row| row.value.portfolio_id != id);

        for mut row in self.notifications.iter_mut() {
            let n = &mut row.value;
            if n.portfolio_id == Some(id) {
                n.portfolio_id = None;
            }
            if n.access_request_id.is_some_and(|r| removed_requests.contains(&r)) {
                n.access_request_id = None;
            }
        }

        debug!(portfolio_id = %id, requests = removed_requests.len(), "Deleted portfolio");
        Ok(true)
    }
}
