//! Portfolio content sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portfoliofy_core::error::AppError;

/// A content section of a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Title, description, and contact details. Has no flag of its own.
    About,
    /// Projects.
    Projects,
    /// Education history.
    Education,
    /// Work experience.
    Experience,
    /// Skills.
    Skills,
    /// Social media links.
    SocialMedia,
}

impl Section {
    /// Every section, in display order.
    pub const ALL: [Section; 6] = [
        Section::About,
        Section::Projects,
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::SocialMedia,
    ];

    /// Return the section as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Projects => "projects",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::SocialMedia => "social_media",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Section {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "about" | "description" => Ok(Self::About),
            "projects" => Ok(Self::Projects),
            "education" => Ok(Self::Education),
            "experience" => Ok(Self::Experience),
            "skills" => Ok(Self::Skills),
            "social_media" | "socialMedia" => Ok(Self::SocialMedia),
            other => Err(AppError::validation(format!("Unknown section: {other}"))),
        }
    }
}
