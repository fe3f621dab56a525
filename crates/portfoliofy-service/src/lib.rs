//! # portfoliofy-service
//!
//! Business logic service layer for Portfoliofy. Each service
//! orchestrates the store traits, the event bus, and credential handling
//! to implement one application use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references, and [`Services`] wires the
//! whole set from a [`Stores`](portfoliofy_database::Stores) bundle.

pub mod access;
pub mod context;
pub mod notification;
pub mod portfolio;
pub mod registry;
pub mod user;
pub mod view_log;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testing;

pub use access::AccessRequestService;
pub use context::RequestContext;
pub use notification::NotificationService;
pub use portfolio::{PortfolioService, PortfolioView};
pub use registry::Services;
pub use user::{RegisterUser, UserService};
pub use view_log::{ViewService, ViewerDetails};
pub use visibility::{ResolvedVisibility, VisibilityResolver};
