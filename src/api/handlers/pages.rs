use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{Datelike, Utc};
use std::sync::Arc;

use super::render_html;
use crate::pages::{self, HomePage};
use crate::AppState;

pub async fn home(State(state): State<Arc<AppState>>) -> Response {
    let sections = state.content.sections();

    match HomePage::from_sections(&sections, Utc::now().year()) {
        Ok(page) => render_html(&page),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render home page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub async fn robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        pages::robots_txt(&state.config.server.site_url),
    )
}

pub async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        pages::sitemap_xml(&state.config.server.site_url, Utc::now()),
    )
}
