//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db_pool {
        None => "memory".to_string(),
        Some(pool) => match pool.ping().await {
            Ok(latency) => format!("connected ({}ms)", latency.as_millis()),
            Err(e) => {
                warn!(error = %e, "Health check: database ping failed");
                "unavailable".to_string()
            }
        },
    };

    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        realtime_subscribers: state.events.subscriber_count(),
    }))
}
