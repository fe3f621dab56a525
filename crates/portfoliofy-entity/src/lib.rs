//! # portfoliofy-entity
//!
//! Domain entity models for Portfoliofy. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod access_request;
pub mod notification;
pub mod portfolio;
pub mod user;
pub mod view_log;
