//! Records who looked at a portfolio and lets the owner see the log.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::types::PageRequest;
use portfoliofy_database::store::{PortfolioStore, UserStore, ViewLogStore};
use portfoliofy_entity::portfolio::{Portfolio, Viewer};
use portfoliofy_entity::view_log::{NewViewLog, PortfolioViewLog};

use crate::context::RequestContext;
use crate::notification::{NotificationService, messages};

/// Contact details an anonymous viewer may leave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerDetails {
    /// Name the viewer gave.
    pub name: Option<String>,
    /// Email the viewer gave.
    pub email: Option<String>,
    /// Phone number the viewer gave.
    pub phone: Option<String>,
}

/// Appends view logs and notifies owners.
#[derive(Debug, Clone)]
pub struct ViewService {
    views: Arc<dyn ViewLogStore>,
    portfolios: Arc<dyn PortfolioStore>,
    users: Arc<dyn UserStore>,
    notifications: Arc<NotificationService>,
    notify_on_view: bool,
}

impl ViewService {
    /// Creates a new view service.
    pub fn new(
        views: Arc<dyn ViewLogStore>,
        portfolios: Arc<dyn PortfolioStore>,
        users: Arc<dyn UserStore>,
        notifications: Arc<NotificationService>,
        notify_on_view: bool,
    ) -> Self {
        Self {
            views,
            portfolios,
            users,
            notifications,
            notify_on_view,
        }
    }

    /// Log a view of `portfolio`. Owner views are not logged and return
    /// `None`. Contact details are only kept for anonymous viewers.
    pub async fn record_view(
        &self,
        portfolio: &Portfolio,
        viewer: Viewer,
        details: ViewerDetails,
    ) -> Result<Option<PortfolioViewLog>, AppError> {
        if viewer.is_owner_of(portfolio) {
            debug!(portfolio_id = %portfolio.id, "Owner view not logged");
            return Ok(None);
        }

        let entry = match viewer {
            Viewer::User(user_id) => NewViewLog {
                portfolio_id: portfolio.id,
                viewer_id: Some(user_id),
                ..Default::default()
            },
            Viewer::Anonymous => NewViewLog {
                portfolio_id: portfolio.id,
                viewer_id: None,
                viewer_name: details.name,
                viewer_email: details.email,
                viewer_phone: details.phone,
            },
        };
        let log = self.views.record(entry).await?;
        debug!(portfolio_id = %portfolio.id, view_id = %log.id, "Portfolio view recorded");

        if self.notify_on_view {
            let label = self.viewer_label(&log).await;
            self.notifications
                .notify_best_effort(messages::portfolio_viewed(portfolio, &label))
                .await;
        }

        Ok(Some(log))
    }

    /// Views of one of the caller's portfolios, newest first.
    pub async fn list_views(
        &self,
        ctx: &RequestContext,
        portfolio_id: Uuid,
        page: Option<PageRequest>,
    ) -> Result<Vec<PortfolioViewLog>, AppError> {
        let portfolio = self
            .portfolios
            .find_by_id(portfolio_id)
            .await?
            .ok_or_else(|| AppError::not_found("Portfolio not found"))?;
        if !portfolio.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the owner can see who viewed this portfolio",
            ));
        }
        self.views.list_for_portfolio(portfolio_id, page).await
    }

    async fn viewer_label(&self, log: &PortfolioViewLog) -> String {
        if let Some(user_id) = log.viewer_id {
            if let Ok(Some(user)) = self.users.find_by_id(user_id).await {
                return user.display_name().to_string();
            }
        }
        log.viewer_name
            .clone()
            .unwrap_or_else(|| "An anonymous visitor".to_string())
    }
}
