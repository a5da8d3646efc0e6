use axum::extract::{Path, State};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson, JSend};
use crate::api::session::AdminSession;
use crate::content::{SectionKey, SectionOrder, SectionUpdate};
use crate::storage::models::{Patch, SectionRecord};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub data: serde_json::Value,
    pub key: String,
    pub nav_title: Option<String>,
    pub order: i32,
    pub slug: Option<String>,
    pub title: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveSectionRequest {
    pub data: serde_json::Value,
    #[serde(default, alias = "navTitle", deserialize_with = "nullable")]
    pub nav_title: Option<Option<String>>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Option<Option<String>>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<SectionOrder>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub sections: Vec<SectionResponse>,
}

/// Distinguishes between a missing field (`None`) and an explicit `null` (`Some(None)`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: DeserializeOwned,
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_sections(State(state): State<Arc<AppState>>) -> Json<JSend<Vec<SectionResponse>>> {
    let sections = state.content.sections();
    JSend::success(sections.iter().map(section_to_response).collect())
}

pub async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> Result<Json<JSend<SectionResponse>>, ApiError> {
    let key: SectionKey = section.parse()?;
    Ok(JSend::success(section_to_response(&state.content.section(key))))
}

pub async fn save_section(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Path(section): Path<String>,
    AppJson(req): AppJson<SaveSectionRequest>,
) -> Result<Json<JSend<SectionResponse>>, ApiError> {
    let key: SectionKey = section.parse()?;

    let update = SectionUpdate {
        title: req.title,
        nav_title: Patch::from(req.nav_title),
        slug: Patch::from(req.slug),
        order: req.order,
        data: req.data,
    };
    let saved = state.content.save(key, update)?;

    tracing::info!(section = %key, by = %session.sub, "Section updated");
    Ok(JSend::success(section_to_response(&saved)))
}

pub async fn reorder_sections(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    AppJson(req): AppJson<ReorderRequest>,
) -> Result<Json<JSend<ReorderResponse>>, ApiError> {
    state.content.reorder(&req.items)?;

    tracing::info!(count = req.items.len(), by = %session.sub, "Sections reordered");
    let sections = state.content.sections();
    Ok(JSend::success(ReorderResponse {
        sections: sections.iter().map(section_to_response).collect(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn section_to_response(section: &SectionRecord) -> SectionResponse {
    SectionResponse {
        data: section.data.clone(),
        key: section.key.clone(),
        nav_title: section.nav_title.clone(),
        order: section.order,
        slug: section.slug.clone(),
        title: section.title.clone(),
        updated_at: section.updated_at.to_rfc3339(),
    }
}
