//! Portfolio view logging.

pub mod service;

pub use service::{ViewService, ViewerDetails};
