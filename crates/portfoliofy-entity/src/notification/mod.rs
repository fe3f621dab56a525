//! Notification domain entities.

pub mod filter;
pub mod kind;
pub mod model;

pub use filter::NotificationFilter;
pub use kind::NotificationKind;
pub use model::{NewNotification, Notification};
