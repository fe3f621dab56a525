//! Portfolio view log entities.

pub mod model;

pub use model::{NewViewLog, PortfolioViewLog};
