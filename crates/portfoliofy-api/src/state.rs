//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use portfoliofy_auth::JwtDecoder;
use portfoliofy_core::config::AppConfig;
use portfoliofy_core::events::EventBus;
use portfoliofy_database::{DatabasePool, Stores};
use portfoliofy_service::Services;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent on the in-memory backend
    pub db_pool: Option<DatabasePool>,
    /// Domain event bus feeding the realtime channel
    pub events: EventBus,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Every application service
    pub services: Services,
}

impl AppState {
    /// Wire services over `stores` and wrap them with the shared state.
    pub fn new(config: AppConfig, stores: &Stores, db_pool: Option<DatabasePool>) -> Self {
        let events = EventBus::new(config.notifications.channel_capacity);
        let services = Services::new(stores, &config, events.clone());
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            db_pool,
            events,
            jwt_decoder,
            services,
        }
    }
}
