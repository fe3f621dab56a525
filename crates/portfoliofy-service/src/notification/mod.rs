//! Notification engine.

pub mod messages;
pub mod service;

pub use service::NotificationService;
