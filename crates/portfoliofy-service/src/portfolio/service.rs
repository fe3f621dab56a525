//! Portfolio CRUD, visibility flags, and the resolved view.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use portfoliofy_core::error::AppError;
use portfoliofy_core::types::PageRequest;
use portfoliofy_database::store::{AccessRequestStore, PortfolioStore};
use portfoliofy_entity::portfolio::{
    CreatePortfolio, Portfolio, UpdatePortfolio, Viewer, VisibilityUpdate,
};

use super::presented::PortfolioView;
use crate::context::RequestContext;
use crate::view_log::{ViewService, ViewerDetails};
use crate::visibility::VisibilityResolver;

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 5000;

/// Owner-side portfolio management plus the viewer-side resolved view.
#[derive(Debug, Clone)]
pub struct PortfolioService {
    portfolios: Arc<dyn PortfolioStore>,
    requests: Arc<dyn AccessRequestStore>,
    resolver: Arc<VisibilityResolver>,
    views: Arc<ViewService>,
}

impl PortfolioService {
    /// Creates a new portfolio service.
    pub fn new(
        portfolios: Arc<dyn PortfolioStore>,
        requests: Arc<dyn AccessRequestStore>,
        resolver: Arc<VisibilityResolver>,
        views: Arc<ViewService>,
    ) -> Self {
        Self {
            portfolios,
            requests,
            resolver,
            views,
        }
    }

    /// Create a portfolio owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut draft: CreatePortfolio,
    ) -> Result<Portfolio, AppError> {
        draft.owner_id = ctx.user_id;
        draft.title = draft.title.trim().to_string();
        validate_title(&draft.title)?;
        validate_description(draft.description.as_deref())?;

        let portfolio = self.portfolios.create(draft).await?;
        info!(portfolio_id = %portfolio.id, owner_id = %ctx.user_id, "Portfolio created");
        Ok(portfolio)
    }

    /// The caller's portfolios, newest first.
    pub async fn list_own(&self, ctx: &RequestContext) -> Result<Vec<Portfolio>, AppError> {
        self.portfolios.list_by_owner(ctx.user_id).await
    }

    /// Public portfolios, newest first.
    pub async fn list_public(&self, page: Option<PageRequest>) -> Result<Vec<Portfolio>, AppError> {
        self.portfolios.list_public(page).await
    }

    /// A portfolio the caller owns.
    pub async fn get_owned(&self, ctx: &RequestContext, id: Uuid) -> Result<Portfolio, AppError> {
        let portfolio = self.find(id).await?;
        if !portfolio.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden("You do not own this portfolio"));
        }
        Ok(portfolio)
    }

    /// Update core fields. Absent fields are unchanged.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: UpdatePortfolio,
    ) -> Result<Portfolio, AppError> {
        if let Some(title) = &update.title {
            validate_title(title.trim())?;
        }
        validate_description(update.description.as_deref())?;

        let mut portfolio = self.get_owned(ctx, id).await?;
        portfolio.apply_update(UpdatePortfolio {
            title: update.title.map(|t| t.trim().to_string()),
            ..update
        });
        let saved = self.portfolios.update(&portfolio).await?;
        info!(portfolio_id = %id, "Portfolio updated");
        Ok(saved)
    }

    /// Update the master flag and section flags. Absent fields are
    /// unchanged.
    pub async fn update_visibility(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: VisibilityUpdate,
    ) -> Result<Portfolio, AppError> {
        let mut portfolio = self.get_owned(ctx, id).await?;
        portfolio.apply_visibility(update);
        let saved = self.portfolios.update(&portfolio).await?;
        info!(
            portfolio_id = %id,
            is_public = saved.is_public,
            "Portfolio visibility updated"
        );
        Ok(saved)
    }

    /// Delete a portfolio with its requests and view logs.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.get_owned(ctx, id).await?;
        if !self.portfolios.delete(id).await? {
            return Err(AppError::not_found("Portfolio not found"));
        }
        info!(portfolio_id = %id, "Portfolio deleted");
        Ok(())
    }

    /// Open a portfolio as `viewer`: resolve visibility, log the view for
    /// non-owners, and return only what the viewer may see.
    pub async fn view(
        &self,
        viewer: Viewer,
        id: Uuid,
        details: ViewerDetails,
    ) -> Result<PortfolioView, AppError> {
        let portfolio = self.find(id).await?;
        let resolved = self.resolver.resolve(&portfolio, viewer).await?;

        let request_status = match viewer {
            Viewer::User(user_id) if !portfolio.is_owned_by(user_id) => self
                .requests
                .find_latest(portfolio.id, user_id)
                .await?
                .map(|r| r.status),
            _ => None,
        };
        let can_request_access = resolved.can_request_access(viewer)
            && !request_status.is_some_and(|s| s.blocks_new_request());

        if let Err(e) = self.views.record_view(&portfolio, viewer, details).await {
            warn!(portfolio_id = %id, error = %e, "Failed to record portfolio view");
        }

        Ok(PortfolioView::build(
            portfolio,
            resolved,
            can_request_access,
            request_status,
        ))
    }

    async fn find(&self, id: Uuid) -> Result<Portfolio, AppError> {
        self.portfolios
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Portfolio not found"))
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX {
        return Err(AppError::validation(format!(
            "Title must be between 1 and {TITLE_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), AppError> {
    if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX) {
        return Err(AppError::validation(format!(
            "Description must be at most {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(())
}
