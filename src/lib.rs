//! folio - A portfolio website with a self-hosted content admin panel
//!
//! This crate serves a single-page portfolio and the admin panel that edits it:
//! - Ordered content sections with built-in fallback content
//! - redb embedded database for sections, uploads and the admin account
//! - Swappable media storage backends (local filesystem, Supabase Storage)
//! - bcrypt passwords with signed, cookie-carried sessions
//! - JSend REST API plus server-rendered askama pages

pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod object_store;
pub mod pages;
pub mod storage;
#[cfg(test)]
pub mod testutil;

use std::sync::Arc;

use auth::SessionKeys;
use config::Config;
use content::ContentService;
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub content: ContentService,
    pub sessions: SessionKeys,
    pub object_store: Arc<dyn object_store::ObjectStore>,
}

impl AppState {
    pub fn new(config: Config, db: Database, object_store: Arc<dyn object_store::ObjectStore>) -> Self {
        let sessions = SessionKeys::new(&config.auth.session_secret);
        let content = ContentService::new(db.clone());
        Self {
            config,
            db,
            content,
            sessions,
            object_store,
        }
    }
}
