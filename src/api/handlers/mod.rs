mod admin;
mod auth;
mod content;
mod dashboard;
mod pages;
mod static_files;
mod uploads;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

pub use admin::{admin_purge, health};
pub use auth::{change_password, login, logout, me};
pub use content::{get_section, list_sections, reorder_sections, save_section};
pub use dashboard::{
    dashboard, edit_section, login_page, login_submit, logout_submit, save_section as save_section_form,
    security_page, security_submit,
};
pub use pages::{home, robots, sitemap};
pub use static_files::serve_upload;
pub use uploads::{list_uploads, upload_file};

/// Render a template into an HTML response, logging render failures as 500s.
fn render_html<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render template");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
