use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::auth::cookie::token_from_headers;
use crate::auth::Claims;
use crate::AppState;

/// An authenticated admin session. Rejects with a JSend 401.
pub struct AdminSession(pub Claims);

/// A session if the request carries a valid one. Never rejects.
pub struct MaybeSession(pub Option<Claims>);

fn session_from_parts(parts: &Parts, state: &AppState) -> Result<Claims, ApiError> {
    let token = token_from_headers(&parts.headers)
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;
    Ok(state.sessions.verify(&token)?)
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, ApiError> {
        session_from_parts(parts, state).map(AdminSession)
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(session_from_parts(parts, state).ok()))
    }
}
