use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson, JSend};
use crate::api::session::AdminSession;
use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::{self, PasswordChange};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub email: String,
    pub expires_at: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let user = auth::authenticate(&state.db, &req.email, &req.password).map_err(|e| {
        tracing::info!(email = %req.email, "Rejected login attempt");
        ApiError::from(e)
    })?;
    let token = state.sessions.issue(&user)?;
    let claims = state.sessions.verify(&token)?;

    tracing::info!(email = %user.email, "Admin logged in");
    Ok((
        [(header::SET_COOKIE, session_cookie(&token, state.config.auth.secure_cookies))],
        JSend::success(session_to_response(&claims)),
    ))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie(state.config.auth.secure_cookies))],
        JSend::success(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

pub async fn me(AdminSession(session): AdminSession) -> Json<JSend<SessionResponse>> {
    JSend::success(session_to_response(&session))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    AppJson(req): AppJson<PasswordChange>,
) -> Result<Json<JSend<MessageResponse>>, ApiError> {
    auth::change_password(&state.db, &session.sub, &req)?;

    Ok(JSend::success(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn session_to_response(claims: &auth::Claims) -> SessionResponse {
    let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();

    SessionResponse {
        email: claims.sub.clone(),
        expires_at,
        name: claims.name.clone(),
    }
}
