//! Admin panel pages. Every handler here answers with HTML or a redirect,
//! never with a JSend envelope.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;

use super::render_html;
use crate::api::response::AppQuery;
use crate::api::session::MaybeSession;
use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::{self, AuthError, Claims, PasswordChange};
use crate::content::{ContentError, SectionKey, SectionUpdate};
use crate::pages::admin::{DashboardPage, EditorPage, LoginPage, SecurityPage};
use crate::storage::models::Patch;
use crate::AppState;

const LOGIN_PATH: &str = "/admin/login";

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SectionForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub nav_title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub order: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditorParams {
    #[serde(default)]
    pub saved: bool,
}

// ============================================================================
// Session
// ============================================================================

pub async fn login_page(MaybeSession(session): MaybeSession) -> Response {
    if session.is_some() {
        return Redirect::to("/admin").into_response();
    }
    render_html(&LoginPage::default())
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim().to_string();

    let user = match auth::authenticate(&state.db, &email, &form.password) {
        Ok(user) => user,
        Err(e) => {
            if !matches!(e, AuthError::InvalidCredentials) {
                tracing::error!(error = %e, "Login failed");
            }
            let page = LoginPage {
                email,
                error: "Invalid email or password".to_string(),
            };
            return (StatusCode::UNAUTHORIZED, render_html(&page)).into_response();
        }
    };

    match state.sessions.issue(&user) {
        Ok(token) => {
            tracing::info!(email = %user.email, "Admin logged in");
            (
                [(header::SET_COOKIE, session_cookie(&token, state.config.auth.secure_cookies))],
                Redirect::to("/admin"),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue session");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub async fn logout_submit(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::SET_COOKIE, clear_session_cookie(state.config.auth.secure_cookies))],
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

// ============================================================================
// Sections
// ============================================================================

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
) -> Response {
    let Some(session) = session else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let sections = state.content.sections();
    render_html(&DashboardPage::new(&session.name, &sections))
}

pub async fn edit_section(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Path(key): Path<String>,
    AppQuery(params): AppQuery<EditorParams>,
) -> Response {
    let Some(session) = session else {
        return Redirect::to(LOGIN_PATH).into_response();
    };
    let Ok(key) = key.parse::<SectionKey>() else {
        return section_not_found();
    };

    let mut page = EditorPage::new(&session.name, &state.content.section(key));
    page.saved = params.saved;
    render_html(&page)
}

pub async fn save_section(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Path(key): Path<String>,
    Form(form): Form<SectionForm>,
) -> Response {
    let Some(session) = session else {
        return Redirect::to(LOGIN_PATH).into_response();
    };
    let Ok(key) = key.parse::<SectionKey>() else {
        return section_not_found();
    };

    match apply_section_form(&state, key, &form) {
        Ok(_) => {
            tracing::info!(section = %key, by = %session.sub, "Section updated");
            Redirect::to(&format!("/admin/sections/{key}?saved=true")).into_response()
        }
        Err(message) => {
            // Re-render with what was submitted so nothing typed is lost
            let page = EditorPage {
                user_name: session.name,
                key: key.to_string(),
                title: form.title,
                nav_title: form.nav_title,
                slug: form.slug,
                order: form.order,
                data: form.data,
                error: message,
                saved: false,
            };
            (StatusCode::BAD_REQUEST, render_html(&page)).into_response()
        }
    }
}

fn apply_section_form(state: &AppState, key: SectionKey, form: &SectionForm) -> Result<(), String> {
    let data: serde_json::Value =
        serde_json::from_str(&form.data).map_err(|e| format!("Content is not valid JSON: {e}"))?;

    let order = match form.order.trim() {
        "" => None,
        raw => Some(
            raw.parse::<i32>()
                .map_err(|_| "Order must be a whole number".to_string())?,
        ),
    };

    let update = SectionUpdate {
        title: Some(form.title.clone()),
        // Blank inputs clear the field
        nav_title: Patch::Value(form.nav_title.clone()),
        slug: Patch::Value(form.slug.clone()),
        order,
        data,
    };

    match state.content.save(key, update) {
        Ok(_) => Ok(()),
        Err(ContentError::Database(e)) => {
            tracing::error!(section = %key, error = %e, "Failed to save section");
            Err("Failed to save changes".to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn section_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Section not found").into_response()
}

// ============================================================================
// Security
// ============================================================================

pub async fn security_page(MaybeSession(session): MaybeSession) -> Response {
    match session {
        Some(session) => render_html(&SecurityPage::new(&session.name)),
        None => Redirect::to(LOGIN_PATH).into_response(),
    }
}

pub async fn security_submit(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Form(change): Form<PasswordChange>,
) -> Response {
    let Some(session) = session else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let mut page = SecurityPage::new(&session.name);
    match auth::change_password(&state.db, &session.sub, &change) {
        Ok(()) => {
            page.success = true;
            render_html(&page)
        }
        Err(e) => {
            let status = password_error_status(&e, &session);
            page.error = match e {
                AuthError::Validation(message) => message,
                _ => "Failed to update password".to_string(),
            };
            (status, render_html(&page)).into_response()
        }
    }
}

fn password_error_status(e: &AuthError, session: &Claims) -> StatusCode {
    match e {
        AuthError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!(email = %session.sub, error = %e, "Password change failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
