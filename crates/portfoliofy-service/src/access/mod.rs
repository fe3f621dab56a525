//! Access-request workflow.

pub mod service;

pub use service::AccessRequestService;
