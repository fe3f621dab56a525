//! Resolves what a viewer may see of a portfolio.
//!
//! Wraps the pure predicate in `portfoliofy_entity::portfolio::visibility`
//! with the one store lookup it needs: whether the viewer holds an
//! approved access request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use portfoliofy_core::error::AppError;
use portfoliofy_database::store::AccessRequestStore;
use portfoliofy_entity::portfolio::{
    AccessLevel, Portfolio, Section, SectionVisibility, Viewer, can_view_section,
};

/// Visibility of a portfolio for one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVisibility {
    /// Why the viewer sees what they see.
    pub access_level: AccessLevel,
    /// Per-section decision.
    pub sections: SectionVisibility,
}

impl ResolvedVisibility {
    /// Whether the viewer could usefully ask for access.
    pub fn can_request_access(&self, viewer: Viewer) -> bool {
        viewer.user_id().is_some() && self.access_level.can_request_access()
    }
}

/// Looks up grants and applies the section predicate.
#[derive(Debug, Clone)]
pub struct VisibilityResolver {
    requests: Arc<dyn AccessRequestStore>,
}

impl VisibilityResolver {
    /// Creates a new resolver.
    pub fn new(requests: Arc<dyn AccessRequestStore>) -> Self {
        Self { requests }
    }

    /// Whether `viewer` holds an approved request for `portfolio`.
    ///
    /// Anonymous viewers and the owner never query the store.
    pub async fn has_approved_access(
        &self,
        portfolio: &Portfolio,
        viewer: Viewer,
    ) -> Result<bool, AppError> {
        match viewer {
            Viewer::Anonymous => Ok(false),
            Viewer::User(id) if portfolio.is_owned_by(id) => Ok(false),
            Viewer::User(id) => self.requests.has_approved(portfolio.id, id).await,
        }
    }

    /// Decide a single section.
    pub async fn can_view_section(
        &self,
        portfolio: &Portfolio,
        viewer: Viewer,
        section: Section,
    ) -> Result<bool, AppError> {
        let approved = self.has_approved_access(portfolio, viewer).await?;
        Ok(can_view_section(portfolio, viewer, section, approved))
    }

    /// Decide every section with at most one grant lookup.
    pub async fn resolve(
        &self,
        portfolio: &Portfolio,
        viewer: Viewer,
    ) -> Result<ResolvedVisibility, AppError> {
        let approved = self.has_approved_access(portfolio, viewer).await?;
        Ok(ResolvedVisibility {
            access_level: AccessLevel::of(portfolio, viewer, approved),
            sections: SectionVisibility::resolve(portfolio, viewer, approved),
        })
    }
}
