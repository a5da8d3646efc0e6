//! Section content: the closed set of section keys, built-in defaults and the
//! read/write service with storage fallback.

pub mod defaults;
pub mod models;
pub mod text;

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use crate::storage::models::{Patch, SectionRecord};
use crate::storage::{sort_sections, Database, DatabaseError};

pub use defaults::{default_data, default_section, default_sections};
pub use models::{validate_data, SectionData};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    #[error("Invalid data for section '{key}': {source}")]
    InvalidData {
        key: SectionKey,
        source: serde_json::Error,
    },
    #[error("Invalid section settings: {0}")]
    Invalid(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Every section the site knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Hero,
    About,
    Projects,
    Skills,
    Career,
    Contact,
    SiteSettings,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Hero,
        SectionKey::About,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::Career,
        SectionKey::Contact,
        SectionKey::SiteSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Hero => "hero",
            SectionKey::About => "about",
            SectionKey::Projects => "projects",
            SectionKey::Skills => "skills",
            SectionKey::Career => "career",
            SectionKey::Contact => "contact",
            SectionKey::SiteSettings => "siteSettings",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ContentError::UnknownSection(s.to_string()))
    }
}

/// Changes to one section. Absent metadata fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct SectionUpdate {
    pub title: Option<String>,
    pub nav_title: Patch<String>,
    pub slug: Patch<String>,
    pub order: Option<i32>,
    pub data: serde_json::Value,
}

/// Requested position of one section
#[derive(Debug, Clone, Deserialize)]
pub struct SectionOrder {
    #[serde(alias = "id")]
    pub key: String,
    pub order: i32,
}

/// Reads sections with fallback to built-in defaults and validates writes.
#[derive(Clone)]
pub struct ContentService {
    db: Database,
}

impl ContentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// A single section. Never fails: missing rows and storage errors both
    /// fall back to the default.
    pub fn section(&self, key: SectionKey) -> SectionRecord {
        match self.db.get_section(key.as_str()) {
            Ok(Some(section)) => section,
            Ok(None) => default_section(key),
            Err(e) => {
                tracing::warn!(section = %key, error = %e, "Failed to read section, using default");
                default_section(key)
            }
        }
    }

    /// All known sections in display order, stored rows first and defaults
    /// for whatever has not been saved.
    pub fn sections(&self) -> Vec<SectionRecord> {
        let stored = match self.db.list_sections() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list sections, using defaults");
                Vec::new()
            }
        };

        let mut sections: Vec<SectionRecord> = stored
            .into_iter()
            .filter(|s| s.key.parse::<SectionKey>().is_ok())
            .collect();

        for key in SectionKey::ALL {
            if !sections.iter().any(|s| s.key == key.as_str()) {
                sections.push(default_section(key));
            }
        }

        sort_sections(&mut sections);
        sections
    }

    /// Apply an update to a section and persist it.
    pub fn save(&self, key: SectionKey, update: SectionUpdate) -> Result<SectionRecord, ContentError> {
        validate_data(key, &update.data).map_err(|source| ContentError::InvalidData { key, source })?;

        let mut section = self
            .db
            .get_section(key.as_str())?
            .unwrap_or_else(|| default_section(key));

        if let Some(title) = update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ContentError::Invalid("title must not be empty".to_string()));
            }
            section.title = title.to_string();
        }

        normalize(update.nav_title).apply_to(&mut section.nav_title);

        let slug = normalize(update.slug);
        if let Patch::Value(ref slug) = slug {
            validate_slug(slug)?;
        }
        slug.apply_to(&mut section.slug);

        if let Some(order) = update.order {
            section.order = order;
        }

        section.data = update.data;
        section.updated_at = Utc::now();

        self.db.put_section(&section)?;
        tracing::debug!(section = %key, "Saved section");
        Ok(section)
    }

    /// Persist a new ordering. All keys must be known; nothing is written
    /// unless every item applies.
    pub fn reorder(&self, items: &[SectionOrder]) -> Result<(), ContentError> {
        let orders = items
            .iter()
            .map(|item| item.key.parse::<SectionKey>().map(|key| (key.as_str().to_string(), item.order)))
            .collect::<Result<Vec<_>, _>>()?;

        if orders.is_empty() {
            return Ok(());
        }

        self.db
            .reorder_sections(&orders, |key| key.parse::<SectionKey>().ok().map(default_section))
            .map_err(|e| match e {
                DatabaseError::NotFound(key) => ContentError::UnknownSection(key),
                other => ContentError::Database(other),
            })?;

        tracing::debug!(count = orders.len(), "Reordered sections");
        Ok(())
    }

    /// Write the built-in default for every known section. Existing rows are
    /// replaced only when `overwrite` is set. Returns the number of rows written.
    pub fn seed(&self, overwrite: bool) -> Result<usize, ContentError> {
        let mut written = 0;
        for mut section in default_sections() {
            section.updated_at = Utc::now();
            if overwrite {
                self.db.put_section(&section)?;
                written += 1;
            } else if self.db.insert_section_if_absent(&section)? {
                written += 1;
            }
        }
        Ok(written)
    }
}

/// Treat blank strings as a request to clear the field.
fn normalize(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Value(v) if v.trim().is_empty() => Patch::Null,
        Patch::Value(v) => Patch::Value(v.trim().to_string()),
        other => other,
    }
}

fn validate_slug(slug: &str) -> Result<(), ContentError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ContentError::Invalid(format!(
            "slug '{slug}' may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> (tempfile::TempDir, ContentService) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("data")).unwrap();
        (dir, ContentService::new(db))
    }

    #[test]
    fn key_parsing_is_exact() {
        assert_eq!("siteSettings".parse::<SectionKey>().unwrap(), SectionKey::SiteSettings);
        assert!("sitesettings".parse::<SectionKey>().is_err());
        assert!("blog".parse::<SectionKey>().is_err());
    }

    #[test]
    fn empty_store_serves_defaults_in_order() {
        let (_dir, content) = service();
        let keys: Vec<String> = content.sections().into_iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            ["hero", "about", "projects", "skills", "career", "contact", "siteSettings"]
        );
        assert_eq!(content.section(SectionKey::Hero).data["name"], "Dominik");
    }

    #[test]
    fn unreadable_store_serves_defaults() {
        let (_dir, content) = service();
        let write_txn = content.db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(crate::storage::SECTIONS).unwrap();
            table.insert("hero", [0xc1u8].as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        let sections = content.sections();
        assert_eq!(sections.len(), SectionKey::ALL.len());
        assert_eq!(sections[0].key, "hero");
        assert_eq!(sections[0].data, default_data(SectionKey::Hero));
        assert_eq!(content.section(SectionKey::Hero).data, default_data(SectionKey::Hero));
    }

    #[test]
    fn save_keeps_metadata_when_absent() {
        let (_dir, content) = service();
        let saved = content
            .save(
                SectionKey::Hero,
                SectionUpdate {
                    data: json!({ "name": "Ada", "jobTitle": "Engineer" }),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(saved.title, "Hero Section");
        assert_eq!(saved.slug.as_deref(), Some("hero"));
        assert_eq!(content.section(SectionKey::Hero).data["name"], "Ada");
    }

    #[test]
    fn blank_nav_title_clears_it() {
        let (_dir, content) = service();
        let saved = content
            .save(
                SectionKey::About,
                SectionUpdate {
                    nav_title: Patch::Value("   ".to_string()),
                    data: default_data(SectionKey::About),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(saved.nav_title, None);
    }

    #[test]
    fn save_rejects_bad_payload_and_slug() {
        let (_dir, content) = service();
        let err = content
            .save(
                SectionKey::Skills,
                SectionUpdate {
                    data: json!({ "not": "a list" }),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidData { key: SectionKey::Skills, .. }));

        let err = content
            .save(
                SectionKey::Skills,
                SectionUpdate {
                    slug: Patch::Value("my skills!".to_string()),
                    data: default_data(SectionKey::Skills),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)));
    }

    #[test]
    fn reorder_matches_submitted_order() {
        let (_dir, content) = service();
        content.seed(false).unwrap();

        let items = vec![
            SectionOrder { key: "contact".into(), order: 1 },
            SectionOrder { key: "hero".into(), order: 2 },
            SectionOrder { key: "about".into(), order: 3 },
        ];
        content.reorder(&items).unwrap();

        let keys: Vec<String> = content.sections().into_iter().take(3).map(|s| s.key).collect();
        assert_eq!(keys, ["contact", "hero", "about"]);
    }

    #[test]
    fn reorder_on_unseeded_store_materializes_defaults() {
        let (_dir, content) = service();
        content
            .reorder(&[SectionOrder { key: "career".into(), order: 0 }])
            .unwrap();

        let first = &content.sections()[0];
        assert_eq!(first.key, "career");
        assert_eq!(first.title, "Career");
    }

    #[test]
    fn reorder_with_unknown_key_writes_nothing() {
        let (_dir, content) = service();
        content.seed(false).unwrap();

        let items = vec![
            SectionOrder { key: "contact".into(), order: 1 },
            SectionOrder { key: "blog".into(), order: 2 },
        ];
        let err = content.reorder(&items).unwrap_err();
        assert!(matches!(err, ContentError::UnknownSection(ref k) if k == "blog"));
        assert_eq!(content.section(SectionKey::Contact).order, 6);
    }

    #[test]
    fn seed_without_overwrite_keeps_edits() {
        let (_dir, content) = service();
        assert_eq!(content.seed(false).unwrap(), SectionKey::ALL.len());

        content
            .save(
                SectionKey::Hero,
                SectionUpdate {
                    data: json!({ "name": "Ada", "jobTitle": "Engineer" }),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(content.seed(false).unwrap(), 0);
        assert_eq!(content.section(SectionKey::Hero).data["name"], "Ada");

        assert_eq!(content.seed(true).unwrap(), SectionKey::ALL.len());
        assert_eq!(content.section(SectionKey::Hero).data["name"], "Dominik");
    }
}
