//! `AuthUser` extractor: pulls the JWT from the Authorization header,
//! validates it, and injects a [`RequestContext`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use portfoliofy_core::error::AppError;
use portfoliofy_entity::portfolio::Viewer;
use portfoliofy_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_context(parts, state).await? {
            Some(ctx) => Ok(AuthUser(ctx)),
            None => Err(AppError::unauthorized("Missing Authorization header").into()),
        }
    }
}

/// Caller context when a bearer token is present; anonymous otherwise.
///
/// A token that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

impl OptionalAuthUser {
    /// The caller as a portfolio viewer.
    pub fn viewer(&self) -> Viewer {
        self.0.as_ref().map_or(Viewer::Anonymous, RequestContext::viewer)
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(bearer_context(parts, state).await?))
    }
}

async fn bearer_context(
    parts: &mut Parts,
    state: &AppState,
) -> Result<Option<RequestContext>, ApiError> {
    let header =
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(header)) => header,
            Err(rejection) if rejection.is_missing() => return Ok(None),
            Err(_) => {
                return Err(AppError::unauthorized("Invalid Authorization header format").into());
            }
        };

    let claims = state.jwt_decoder.decode(header.token())?;
    Ok(Some(RequestContext::new(claims.user_id(), claims.username)))
}
