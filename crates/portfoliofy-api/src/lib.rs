//! # portfoliofy-api
//!
//! HTTP API layer for Portfoliofy built on Axum.
//!
//! Provides the REST endpoints, the notification WebSocket, middleware
//! (request logging, CORS, tracing, limits), extractors, DTOs, and the
//! mapping from [`AppError`](portfoliofy_core::AppError) to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
