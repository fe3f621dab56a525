//! User registration, login, and lookup.

pub mod service;

pub use service::{RegisterUser, UserService};
