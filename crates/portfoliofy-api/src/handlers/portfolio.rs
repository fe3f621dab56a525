//! Portfolio handlers: CRUD, visibility flags, the resolved view, and the
//! owner's view log.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use portfoliofy_entity::portfolio::{Portfolio, VisibilityUpdate};
use portfoliofy_entity::view_log::PortfolioViewLog;
use portfoliofy_service::PortfolioView;

use crate::dto::request::{CreatePortfolioRequest, UpdatePortfolioRequest, ViewerQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, OptionalAuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/portfolios
pub async fn list_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Portfolio>>>, ApiError> {
    let portfolios = state.services.portfolios.list_own(&auth).await?;
    Ok(Json(ApiResponse::ok(portfolios)))
}

/// POST /api/portfolios
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePortfolioRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Portfolio>>), ApiError> {
    req.validate()?;
    let portfolio = state.services.portfolios.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(portfolio))))
}

/// GET /api/portfolios/public
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<Portfolio>>>, ApiError> {
    let portfolios = state
        .services
        .portfolios
        .list_public(params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(portfolios)))
}

/// GET /api/portfolios/{id}
pub async fn view(
    State(state): State<AppState>,
    caller: OptionalAuthUser,
    Path(id): Path<Uuid>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<ApiResponse<PortfolioView>>, ApiError> {
    viewer.validate()?;
    let view = state
        .services
        .portfolios
        .view(caller.viewer(), id, viewer.into())
        .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/portfolios/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePortfolioRequest>,
) -> Result<Json<ApiResponse<Portfolio>>, ApiError> {
    req.validate()?;
    let portfolio = state
        .services
        .portfolios
        .update(&auth, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(portfolio)))
}

/// PUT /api/portfolios/{id}/visibility
pub async fn update_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<VisibilityUpdate>,
) -> Result<Json<ApiResponse<Portfolio>>, ApiError> {
    let portfolio = state
        .services
        .portfolios
        .update_visibility(&auth, id, req)
        .await?;
    Ok(Json(ApiResponse::ok(portfolio)))
}

/// DELETE /api/portfolios/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.services.portfolios.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Portfolio deleted"))))
}

/// GET /api/portfolios/{id}/views
pub async fn list_views(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<PortfolioViewLog>>>, ApiError> {
    let views = state
        .services
        .views
        .list_views(&auth, id, params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(views)))
}
