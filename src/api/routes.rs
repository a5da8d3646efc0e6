use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = usize::try_from(state.config.max_upload_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    let mut router = Router::new()
        // Public site
        .route("/", get(handlers::home))
        .route("/robots.txt", get(handlers::robots))
        .route("/sitemap.xml", get(handlers::sitemap))
        .route("/uploads/*key", get(handlers::serve_upload))
        // Content API
        .route("/api/content", get(handlers::list_sections))
        .route("/api/content/reorder", post(handlers::reorder_sections))
        .route(
            "/api/content/:section",
            get(handlers::get_section).post(handlers::save_section),
        )
        .route(
            "/api/upload",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/uploads", get(handlers::list_uploads))
        // Auth API
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/me", get(handlers::me))
        .route("/api/auth/password", post(handlers::change_password))
        // Admin panel
        .route("/admin", get(handlers::dashboard))
        .route(
            "/admin/login",
            get(handlers::login_page).post(handlers::login_submit),
        )
        .route("/admin/logout", post(handlers::logout_submit))
        .route(
            "/admin/sections/:key",
            get(handlers::edit_section).post(handlers::save_section_form),
        )
        .route(
            "/admin/security",
            get(handlers::security_page).post(handlers::security_submit),
        )
        // Internal
        .route("/_internal/health", get(handlers::health));

    // Test-only routes
    if state.config.test_mode {
        tracing::warn!("Test mode enabled, purge route is available.");
        router = router.route("/admin/purge", delete(handlers::admin_purge));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
