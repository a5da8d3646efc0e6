use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::object_store::ObjectStoreError;
use crate::AppState;

/// Serve a stored upload by its object key.
/// Route: GET /uploads/:key
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.object_store.get(&key).await.map_err(|e| match e {
        ObjectStoreError::NotFound(_) | ObjectStoreError::InvalidKey(_) => {
            ApiError::not_found("File not found")
        }
        _ => ApiError::internal(format!("Failed to retrieve file: {e}")),
    })?;

    let byte_size = data.len() as u64;
    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    let mime = mime_guess::from_path(&key).first_or_octet_stream();
    headers.insert(
        header::CONTENT_TYPE,
        mime.as_ref()
            .parse()
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );

    headers.insert(header::CONTENT_LENGTH, header::HeaderValue::from(byte_size));

    if let Ok(value) = format!("inline; filename=\"{key}\"").parse() {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    // Keys are never reused, so the bytes behind a URL never change
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    Ok(response)
}
