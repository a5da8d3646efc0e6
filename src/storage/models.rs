use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-state patch value for partial updates.
/// Unlike `Option<Option<T>>`, each variant has a distinct wire representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Patch<T> {
    /// Field was not included in the request (no change).
    #[default]
    Absent,
    /// Field was explicitly set to null (clear it).
    Null,
    /// Field was set to a new value.
    Value(T),
}

impl<T> From<Option<Option<T>>> for Patch<T> {
    fn from(v: Option<Option<T>>) -> Self {
        match v {
            None => Patch::Absent,
            Some(None) => Patch::Null,
            Some(Some(v)) => Patch::Value(v),
        }
    }
}

impl<T> Patch<T> {
    /// Apply the patch to an optional field in place.
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *field = None,
            Patch::Value(v) => *field = Some(v),
        }
    }
}

/// A page section stored in redb.
///
/// `data` is an opaque JSON payload; its shape depends on the section key and
/// is only interpreted by the content layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub nav_title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    pub order: i32,
    pub data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// One entry of the append-only upload log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    /// Original client-side file name
    pub filename: String,
    /// Key inside the object store
    pub object_key: String,
    /// Public URL the site embeds
    pub url: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub byte_size: u64,
    pub created_at: DateTime<Utc>,
}

/// The admin account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
