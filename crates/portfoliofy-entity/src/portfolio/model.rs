//! Portfolio entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::section::Section;

/// A user's portfolio with its master and per-section visibility flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Portfolio {
    /// Unique portfolio identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Portfolio title.
    pub title: String,
    /// Free-form summary shown in the "about" section.
    pub description: Option<String>,
    /// Master visibility flag.
    pub is_public: bool,
    /// Projects section visible to the public.
    pub is_projects_public: bool,
    /// Education section visible to the public.
    pub is_education_public: bool,
    /// Experience section visible to the public.
    pub is_experience_public: bool,
    /// Skills section visible to the public.
    pub is_skills_public: bool,
    /// Social links section visible to the public.
    pub is_social_media_public: bool,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// When the portfolio was created.
    pub created_at: DateTime<Utc>,
    /// When the portfolio was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    /// Whether `user_id` owns this portfolio.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Value of the section's own public flag.
    ///
    /// The about section has no flag and is always public.
    pub fn is_section_public(&self, section: Section) -> bool {
        match section {
            Section::About => true,
            Section::Projects => self.is_projects_public,
            Section::Education => self.is_education_public,
            Section::Experience => self.is_experience_public,
            Section::Skills => self.is_skills_public,
            Section::SocialMedia => self.is_social_media_public,
        }
    }

    /// Apply a partial update of the core fields.
    pub fn apply_update(&mut self, update: UpdatePortfolio) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(email) = update.contact_email {
            self.contact_email = Some(email);
        }
        if let Some(phone) = update.contact_phone {
            self.contact_phone = Some(phone);
        }
        if let Some(city) = update.city {
            self.city = Some(city);
        }
        if let Some(country) = update.country {
            self.country = Some(country);
        }
        self.updated_at = Utc::now();
    }

    /// Apply a partial update of the visibility flags.
    pub fn apply_visibility(&mut self, update: VisibilityUpdate) {
        if let Some(v) = update.is_public {
            self.is_public = v;
        }
        if let Some(v) = update.is_projects_public {
            self.is_projects_public = v;
        }
        if let Some(v) = update.is_education_public {
            self.is_education_public = v;
        }
        if let Some(v) = update.is_experience_public {
            self.is_experience_public = v;
        }
        if let Some(v) = update.is_skills_public {
            self.is_skills_public = v;
        }
        if let Some(v) = update.is_social_media_public {
            self.is_social_media_public = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to create a new portfolio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePortfolio {
    /// Owner (taken from the authenticated caller).
    pub owner_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Master visibility flag.
    pub is_public: bool,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Contact phone.
    pub contact_phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Country.
    pub country: Option<String>,
}

impl CreatePortfolio {
    /// Materialize a new portfolio row.
    ///
    /// Section flags start public so that flipping the master flag is
    /// enough to publish a portfolio.
    pub fn into_portfolio(self) -> Portfolio {
        let now = Utc::now();
        Portfolio {
            id: Uuid::new_v4(),
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            is_public: self.is_public,
            is_projects_public: true,
            is_education_public: true,
            is_experience_public: true,
            is_skills_public: true,
            is_social_media_public: true,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            city: self.city,
            country: self.country,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a portfolio's core fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePortfolio {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New contact email.
    pub contact_email: Option<String>,
    /// New contact phone.
    pub contact_phone: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New country.
    pub country: Option<String>,
}

/// Partial update of a portfolio's visibility flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibilityUpdate {
    /// Master flag.
    pub is_public: Option<bool>,
    /// Projects flag.
    pub is_projects_public: Option<bool>,
    /// Education flag.
    pub is_education_public: Option<bool>,
    /// Experience flag.
    pub is_experience_public: Option<bool>,
    /// Skills flag.
    pub is_skills_public: Option<bool>,
    /// Social links flag.
    pub is_social_media_public: Option<bool>,
}
