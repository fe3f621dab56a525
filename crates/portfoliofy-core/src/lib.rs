//! # portfoliofy-core
//!
//! Core crate for Portfoliofy. Contains configuration schemas, domain
//! events and the notification event bus, pagination types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Portfoliofy crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
