use async_trait::async_trait;
use uuid::Uuid;

use portfoliofy_core::result::AppResult;
use portfoliofy_core::types::PageRequest;
use portfoliofy_entity::view_log::{NewViewLog, PortfolioViewLog};

use super::{MemoryStore, newest_first};
use crate::store::ViewLogStore;

#[async_trait]
impl ViewLogStore for MemoryStore {
    async fn record(&self, view: NewViewLog) -> AppResult<PortfolioViewLog> {
        let log = view.into_log();
        self.view_logs.insert(log.id, self.row(log.clone()));
        Ok(log)
    }

    async fn list_for_portfolio(
        &self,
        portfolio_id: Uuid,
        page: Option<PageRequest>,
    ) -> AppResult<Vec<PortfolioViewLog>> {
        let all = newest_first(
            self.view_logs
                .iter()
                .filter(|r| r.value.portfolio_id == portfolio_id)
                .map(|r| (r.value.viewed_at, r.seq, r.value.clone()))
                .collect(),
        );
        Ok(match page {
            Some(page) => page.slice(all),
            None => all,
        })
    }
}
