use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppQuery, JSend, JSendPaginated, Pagination};
use crate::api::session::AdminSession;
use crate::object_store::{object_key, ObjectStoreError};
use crate::storage::models::UploadRecord;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub byte_size: u64,
    pub created_at: String,
    pub filename: String,
    pub id: String,
    pub mime_type: Option<String>,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UploadCreated {
    pub upload: UploadResponse,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListUploadsParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    20
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    mut multipart: Multipart,
) -> Result<Json<JSend<UploadCreated>>, ApiError> {
    let mut upload: Option<(Option<String>, Option<String>, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        if field.name() != Some("file") {
            // Ignore unknown fields
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large("File exceeds maximum upload size")
            } else {
                ApiError::bad_request(format!("Failed to read file: {e}"))
            }
        })?;

        if data.len() as u64 > state.config.max_upload_size {
            return Err(ApiError::payload_too_large(format!(
                "File exceeds maximum upload size of {} bytes",
                state.config.max_upload_size
            )));
        }

        upload = Some((file_name, content_type, data));
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let filename = file_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "file".to_string());

    // Content type: from the multipart part, else guessed from the file name
    let mime_type = content_type
        .filter(|ct| ct != "application/octet-stream")
        .or_else(|| mime_guess::from_path(&filename).first().map(|m| m.to_string()));

    let now = Utc::now();
    let key = object_key(now.timestamp_millis(), &filename);
    let byte_size = data.len() as u64;

    // Phase 1: store the bytes
    state
        .object_store
        .put(
            &key,
            data,
            mime_type.as_deref().unwrap_or("application/octet-stream"),
        )
        .await
        .map_err(|e| match e {
            ObjectStoreError::AlreadyExists(_) => {
                ApiError::conflict(format!("An upload named '{key}' already exists"))
            }
            _ => ApiError::internal(format!("Upload failed: {e}")),
        })?;

    // Phase 2: record it in the upload log
    let record = UploadRecord {
        id: uuid::Uuid::new_v4().to_string(),
        filename,
        object_key: key.clone(),
        url: state.object_store.public_url(&key),
        mime_type,
        byte_size,
        created_at: now,
    };

    if let Err(e) = state.db.put_upload(&record) {
        // Best-effort cleanup of the stored blob
        if let Err(cleanup) = state.object_store.delete(&key).await {
            tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned upload");
        }
        return Err(ApiError::internal(e.to_string()));
    }

    tracing::info!(upload_id = %record.id, key = %key, by = %session.sub, "Stored upload");
    Ok(JSend::success(UploadCreated {
        url: record.url.clone(),
        upload: upload_to_response(&record),
    }))
}

pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    AppQuery(params): AppQuery<ListUploadsParams>,
) -> Result<Json<JSendPaginated<UploadResponse>>, ApiError> {
    if params.limit == 0 {
        return Err(ApiError::bad_request("limit must be greater than 0"));
    }

    let uploads = state
        .db
        .list_uploads()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let total = uploads.len() as u64;
    let items: Vec<UploadResponse> = uploads
        .iter()
        .skip(params.offset as usize)
        .take(params.limit as usize)
        .map(upload_to_response)
        .collect();

    Ok(JSendPaginated::success(
        items,
        Pagination {
            limit: params.limit,
            offset: params.offset,
            total,
        },
    ))
}

// ============================================================================
// Helpers
// ============================================================================

fn upload_to_response(upload: &UploadRecord) -> UploadResponse {
    UploadResponse {
        byte_size: upload.byte_size,
        created_at: upload.created_at.to_rfc3339(),
        filename: upload.filename.clone(),
        id: upload.id.clone(),
        mime_type: upload.mime_type.clone(),
        url: upload.url.clone(),
    }
}
