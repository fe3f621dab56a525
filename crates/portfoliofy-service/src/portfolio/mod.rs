//! Portfolio management and the resolved view.

pub mod presented;
pub mod service;

pub use presented::{AboutSection, PortfolioView};
pub use service::PortfolioService;
