//! Access-request handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use portfoliofy_entity::access_request::AccessRequest;

use crate::dto::request::{CreateAccessRequestRequest, DecisionRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/portfolios/{id}/access-requests
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(portfolio_id): Path<Uuid>,
    body: Option<Json<CreateAccessRequestRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<AccessRequest>>), ApiError> {
    let message = body.and_then(|Json(req)| req.message);
    let request = state
        .services
        .access_requests
        .create(&auth, portfolio_id, message)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/portfolios/{id}/access-requests/mine
///
/// The caller's latest request for the portfolio, or `null`.
pub async fn mine(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<AccessRequest>>>, ApiError> {
    let request = state
        .services
        .access_requests
        .status_for(&auth, portfolio_id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/access-requests/received
pub async fn received(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AccessRequest>>>, ApiError> {
    let requests = state.services.access_requests.list_received(&auth).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/access-requests/sent
pub async fn sent(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AccessRequest>>>, ApiError> {
    let requests = state.services.access_requests.list_sent(&auth).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/access-requests/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccessRequest>>, ApiError> {
    let request = state.services.access_requests.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/access-requests/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Option<Json<DecisionRequest>>,
) -> Result<Json<ApiResponse<AccessRequest>>, ApiError> {
    let note = body.and_then(|Json(req)| req.note);
    let request = state
        .services
        .access_requests
        .approve(&auth, id, note)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/access-requests/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Option<Json<DecisionRequest>>,
) -> Result<Json<ApiResponse<AccessRequest>>, ApiError> {
    let note = body.and_then(|Json(req)| req.note);
    let request = state
        .services
        .access_requests
        .reject(&auth, id, note)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}
