mod local;
mod supabase;

pub use local::LocalStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Object already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Abstraction over the media file store.
/// Keys are flat names (no path separators); the upload log maps them to
/// their original file names.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a new object. Existing keys are never overwritten.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), ObjectStoreError>;
    async fn get(&self, key: &str) -> Result<Bytes, ObjectStoreError>;
    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError>;
    async fn exists(&self, key: &str) -> Result<bool, ObjectStoreError>;
    /// URL under which the object is publicly reachable
    fn public_url(&self, key: &str) -> String;
}

/// Build an object key from an upload time and the client's file name.
///
/// The name is reduced to ASCII letters, digits, `.`, `-` and `_`; anything
/// else becomes `-`.
pub fn object_key(timestamp_millis: i64, filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let mut sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();

    // Leading dots would produce hidden files or `..`
    while sanitized.starts_with('.') {
        sanitized.remove(0);
    }
    if sanitized.is_empty() {
        sanitized.push_str("file");
    }

    format!("{timestamp_millis}-{sanitized}")
}

/// Reject keys that could escape a flat namespace.
pub(crate) fn check_key(key: &str) -> Result<(), ObjectStoreError> {
    if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
        return Err(ObjectStoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
