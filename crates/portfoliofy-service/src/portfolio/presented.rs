//! What a viewer receives when opening a portfolio.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portfoliofy_entity::access_request::AccessRequestStatus;
use portfoliofy_entity::portfolio::{AccessLevel, Portfolio, SectionVisibility};

use crate::visibility::ResolvedVisibility;

/// Title, description, and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    /// Portfolio title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Public contact email.
    pub contact_email: Option<String>,
    /// Public contact phone.
    pub contact_phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Country.
    pub country: Option<String>,
}

/// A portfolio as seen by one viewer. Hidden sections carry no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioView {
    /// Portfolio ID.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Master visibility flag.
    pub is_public: bool,
    /// Why the viewer sees what they see.
    pub access_level: AccessLevel,
    /// Per-section visibility for this viewer.
    pub sections: SectionVisibility,
    /// Present only when the about section is visible.
    pub about: Option<AboutSection>,
    /// Whether a signed-in viewer could ask for access.
    pub can_request_access: bool,
    /// Status of the viewer's latest request, if any.
    pub request_status: Option<AccessRequestStatus>,
}

impl PortfolioView {
    /// Strip everything the viewer may not see.
    pub fn build(
        portfolio: Portfolio,
        resolved: ResolvedVisibility,
        can_request_access: bool,
        request_status: Option<AccessRequestStatus>,
    ) -> Self {
        let about = resolved.sections.about.then(|| AboutSection {
            title: portfolio.title,
            description: portfolio.description,
            contact_email: portfolio.contact_email,
            contact_phone: portfolio.contact_phone,
            city: portfolio.city,
            country: portfolio.country,
        });
        Self {
            id: portfolio.id,
            owner_id: portfolio.owner_id,
            is_public: portfolio.is_public,
            access_level: resolved.access_level,
            sections: resolved.sections,
            about,
            can_request_access,
            request_status,
        }
    }

    /// Whether the viewer was let in at all.
    pub fn is_locked(&self) -> bool {
        self.access_level == AccessLevel::Locked
    }
}
