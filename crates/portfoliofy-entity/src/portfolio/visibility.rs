//! Per-section visibility decisions for a (portfolio, viewer) pair.
//!
//! The predicate here is pure. Whether the viewer holds an approved access
//! request is looked up by the caller and passed in, so this module never
//! touches a store.
//!
//! An approved request is an all-or-nothing grant: it opens every section
//! regardless of the section flags. Only the owner bypasses it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Portfolio;
use super::section::Section;

/// Who is looking at a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Not signed in.
    Anonymous,
    /// An authenticated user.
    User(Uuid),
}

impl Viewer {
    /// The viewer's user ID, if authenticated.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    /// Whether this viewer owns the portfolio.
    pub fn is_owner_of(&self, portfolio: &Portfolio) -> bool {
        self.user_id().is_some_and(|id| portfolio.is_owned_by(id))
    }
}

impl From<Option<Uuid>> for Viewer {
    fn from(user_id: Option<Uuid>) -> Self {
        user_id.map_or(Self::Anonymous, Self::User)
    }
}

/// Decide whether `viewer` may see `section` of `portfolio`.
pub fn can_view_section(
    portfolio: &Portfolio,
    viewer: Viewer,
    section: Section,
    has_approved_access: bool,
) -> bool {
    if viewer.is_owner_of(portfolio) {
        return true;
    }
    if has_approved_access && viewer.user_id().is_some() {
        return true;
    }
    if !portfolio.is_public {
        return false;
    }
    portfolio.is_section_public(section)
}

/// Why a viewer sees what they see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// The viewer owns the portfolio.
    Owner,
    /// The viewer holds an approved access request.
    Granted,
    /// The portfolio is public; section flags apply.
    Public,
    /// The portfolio is private and the viewer has no grant.
    Locked,
}

impl AccessLevel {
    /// Classify a viewer.
    pub fn of(portfolio: &Portfolio, viewer: Viewer, has_approved_access: bool) -> Self {
        if viewer.is_owner_of(portfolio) {
            Self::Owner
        } else if has_approved_access && viewer.user_id().is_some() {
            Self::Granted
        } else if portfolio.is_public {
            Self::Public
        } else {
            Self::Locked
        }
    }

    /// Whether the viewer could usefully request access.
    pub fn can_request_access(&self) -> bool {
        matches!(self, Self::Locked | Self::Public)
    }
}

/// Resolved visibility of every section for one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionVisibility {
    /// Title, description, contact.
    pub about: bool,
    /// Projects.
    pub projects: bool,
    /// Education.
    pub education: bool,
    /// Experience.
    pub experience: bool,
    /// Skills.
    pub skills: bool,
    /// Social links.
    pub social_media: bool,
}

impl SectionVisibility {
    /// Evaluate [`can_view_section`] for every section.
    pub fn resolve(portfolio: &Portfolio, viewer: Viewer, has_approved_access: bool) -> Self {
        let can = |s| can_view_section(portfolio, viewer, s, has_approved_access);
        Self {
            about: can(Section::About),
            projects: can(Section::Projects),
            education: can(Section::Education),
            experience: can(Section::Experience),
            skills: can(Section::Skills),
            social_media: can(Section::SocialMedia),
        }
    }

    /// Look up one section.
    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::About => self.about,
            Section::Projects => self.projects,
            Section::Education => self.education,
            Section::Experience => self.experience,
            Section::Skills => self.skills,
            Section::SocialMedia => self.social_media,
        }
    }

    /// Sections the viewer may see.
    pub fn visible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.is_visible(*s))
            .collect()
    }
}
