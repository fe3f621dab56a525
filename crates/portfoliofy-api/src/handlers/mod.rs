//! Route handlers organized by domain.

pub mod access_request;
pub mod auth;
pub mod health;
pub mod notification;
pub mod portfolio;
pub mod ws;
