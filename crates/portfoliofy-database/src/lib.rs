//! # portfoliofy-database
//!
//! Store traits for every Portfoliofy entity, their PostgreSQL
//! implementations, and an in-memory backend that honors the same
//! guarantees for development and tests.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{AccessRequestStore, NotificationStore, PortfolioStore, UserStore, ViewLogStore};
pub use stores::Stores;
