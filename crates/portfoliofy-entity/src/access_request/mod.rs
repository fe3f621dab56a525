//! Access-request domain entities and lifecycle.

pub mod model;
pub mod status;

pub use model::{AccessRequest, CreateAccessRequest};
pub use status::{AccessRequestStatus, Decision};
