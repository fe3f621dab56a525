//! Portfolio domain entities and the section-visibility model.

pub mod model;
pub mod section;
pub mod visibility;

pub use model::{CreatePortfolio, Portfolio, UpdatePortfolio, VisibilityUpdate};
pub use section::Section;
pub use visibility::{AccessLevel, SectionVisibility, Viewer, can_view_section};
