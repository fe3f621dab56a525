//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use portfoliofy_entity::portfolio::{CreatePortfolio, UpdatePortfolio};
use portfoliofy_service::{RegisterUser, ViewerDetails};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Full name.
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create portfolio request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePortfolioRequest {
    /// Title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Description.
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// Master visibility flag.
    #[serde(default)]
    pub is_public: bool,
    /// Contact email.
    #[validate(email)]
    pub contact_email: Option<String>,
    /// Contact phone.
    #[validate(length(max = 50))]
    pub contact_phone: Option<String>,
    /// City.
    #[validate(length(max = 100))]
    pub city: Option<String>,
    /// Country.
    #[validate(length(max = 100))]
    pub country: Option<String>,
}

impl From<CreatePortfolioRequest> for CreatePortfolio {
    fn from(req: CreatePortfolioRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            is_public: req.is_public,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            city: req.city,
            country: req.country,
            ..Default::default()
        }
    }
}

/// Update portfolio request. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePortfolioRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New description.
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// New contact email.
    #[validate(email)]
    pub contact_email: Option<String>,
    /// New contact phone.
    #[validate(length(max = 50))]
    pub contact_phone: Option<String>,
    /// New city.
    #[validate(length(max = 100))]
    pub city: Option<String>,
    /// New country.
    #[validate(length(max = 100))]
    pub country: Option<String>,
}

impl From<UpdatePortfolioRequest> for UpdatePortfolio {
    fn from(req: UpdatePortfolioRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            city: req.city,
            country: req.country,
        }
    }
}

/// Create access request body. Length limits are enforced by the workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccessRequestRequest {
    /// Optional message to the owner.
    pub message: Option<String>,
}

/// Approve or reject body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Optional note to the requester.
    pub note: Option<String>,
}

/// Contact details an anonymous viewer may leave when opening a portfolio.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ViewerQuery {
    /// Name.
    #[validate(length(max = 200))]
    pub name: Option<String>,
    /// Email.
    #[validate(length(max = 254))]
    pub email: Option<String>,
    /// Phone.
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

impl From<ViewerQuery> for ViewerDetails {
    fn from(q: ViewerQuery) -> Self {
        Self {
            name: q.name,
            email: q.email,
            phone: q.phone,
        }
    }
}

/// Notification listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQuery {
    /// `all`, `unread`, `read`, `access`, or `portfolio_view`.
    pub filter: Option<String>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub per_page: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "x".to_string(),
            full_name: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_allows_empty_body() {
        assert!(UpdatePortfolioRequest::default().validate().is_ok());
    }
}
