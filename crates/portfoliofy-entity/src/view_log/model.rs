//! Portfolio view log entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded visit to a portfolio by someone other than its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PortfolioViewLog {
    /// Unique log entry identifier.
    pub id: Uuid,
    /// The viewed portfolio.
    pub portfolio_id: Uuid,
    /// The viewer, when signed in.
    pub viewer_id: Option<Uuid>,
    /// Self-reported name of an anonymous viewer.
    pub viewer_name: Option<String>,
    /// Self-reported email of an anonymous viewer.
    pub viewer_email: Option<String>,
    /// Self-reported phone of an anonymous viewer.
    pub viewer_phone: Option<String>,
    /// When the view happened.
    pub viewed_at: DateTime<Utc>,
}

impl PortfolioViewLog {
    /// Whether the viewer was signed in.
    pub fn is_authenticated(&self) -> bool {
        self.viewer_id.is_some()
    }
}

/// Data captured when a portfolio is viewed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewViewLog {
    /// The viewed portfolio.
    pub portfolio_id: Uuid,
    /// The viewer, when signed in.
    pub viewer_id: Option<Uuid>,
    /// Optional contact name.
    pub viewer_name: Option<String>,
    /// Optional contact email.
    pub viewer_email: Option<String>,
    /// Optional contact phone.
    pub viewer_phone: Option<String>,
}

impl NewViewLog {
    /// Materialize a log row stamped now. Blank contact fields become `None`.
    pub fn into_log(self) -> PortfolioViewLog {
        PortfolioViewLog {
            id: Uuid::new_v4(),
            portfolio_id: self.portfolio_id,
            viewer_id: self.viewer_id,
            viewer_name: non_blank(self.viewer_name),
            viewer_email: non_blank(self.viewer_email),
            viewer_phone: non_blank(self.viewer_phone),
            viewed_at: Utc::now(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
