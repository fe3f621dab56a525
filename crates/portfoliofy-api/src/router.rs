//! Route definitions for the Portfoliofy HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let max_body = server.max_body_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(portfolio_routes())
        .merge(access_request_routes())
        .merge(notification_routes())
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Registration, login, current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Portfolio CRUD, resolved view, view log, and request creation
fn portfolio_routes() -> Router<AppState> {
    use handlers::{access_request, portfolio};

    Router::new()
        .route(
            "/portfolios",
            get(portfolio::list_own).post(portfolio::create),
        )
        .route("/portfolios/public", get(portfolio::list_public))
        .route(
            "/portfolios/{id}",
            get(portfolio::view)
                .put(portfolio::update)
                .delete(portfolio::delete),
        )
        .route(
            "/portfolios/{id}/visibility",
            put(portfolio::update_visibility),
        )
        .route("/portfolios/{id}/views", get(portfolio::list_views))
        .route(
            "/portfolios/{id}/access-requests",
            post(access_request::create),
        )
        .route(
            "/portfolios/{id}/access-requests/mine",
            get(access_request::mine),
        )
}

/// Received/sent lists and owner decisions
fn access_request_routes() -> Router<AppState> {
    use handlers::access_request;

    Router::new()
        .route("/access-requests/received", get(access_request::received))
        .route("/access-requests/sent", get(access_request::sent))
        .route("/access-requests/{id}", get(access_request::get))
        .route(
            "/access-requests/{id}/approve",
            put(access_request::approve),
        )
        .route("/access-requests/{id}/reject", put(access_request::reject))
}

/// Notification inbox
fn notification_routes() -> Router<AppState> {
    use handlers::notification;

    Router::new()
        .route("/notifications", get(notification::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notification::unread_count),
        )
        .route("/notifications/read-all", put(notification::mark_all_read))
        .route("/notifications/{id}/read", put(notification::mark_read))
}
