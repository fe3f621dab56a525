//! Notification handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use portfoliofy_entity::notification::{Notification, NotificationFilter};

use crate::dto::request::NotificationQuery;
use crate::dto::response::{ApiResponse, CountResponse, MarkedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications?filter=
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let filter = match query.filter.as_deref() {
        Some(raw) => NotificationFilter::from_str(raw)?,
        None => NotificationFilter::All,
    };
    let page = PaginationParams {
        page: query.page,
        per_page: query.per_page,
    }
    .page_request();

    let notifications = state
        .services
        .notifications
        .list_for_user(&auth, filter, page)
        .await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.services.notifications.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.services.notifications.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MarkedResponse>>, ApiError> {
    let marked = state.services.notifications.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(MarkedResponse { marked })))
}
