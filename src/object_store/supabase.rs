use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use super::{check_key, ObjectStore, ObjectStoreError};

/// Supabase Storage backend (public bucket).
pub struct SupabaseStore {
    base_url: String,
    bucket: String,
    client: Client,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, service_key: &str, bucket: &str) -> Result<Self, anyhow::Error> {
        let client = Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            client,
            service_key: service_key.to_string(),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }
}

#[async_trait]
impl ObjectStore for SupabaseStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), ObjectStoreError> {
        check_key(key)?;

        let resp = self
            .authorized(self.client.post(self.object_url(key)))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::CONFLICT {
            return Err(ObjectStoreError::AlreadyExists(key.to_string()));
        }

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ObjectStoreError::Backend(format!(
                "Supabase upload failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, ObjectStoreError> {
        check_key(key)?;

        let resp = self
            .authorized(self.client.get(self.object_url(key)))
            .send()
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;

        // Supabase reports missing objects as 400 or 404 depending on version
        if matches!(
            resp.status(),
            reqwest::StatusCode::NOT_FOUND | reqwest::StatusCode::BAD_REQUEST
        ) {
            return Err(ObjectStoreError::NotFound(key.to_string()));
        }

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ObjectStoreError::Backend(format!(
                "Supabase download failed ({status}): {body}"
            )));
        }

        resp.bytes()
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError> {
        check_key(key)?;

        let resp = self
            .authorized(self.client.delete(self.object_url(key)))
            .send()
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;

        // 404 is fine -- object already gone
        if !resp.status().is_success() && resp.status() != reqwest::StatusCode::NOT_FOUND {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ObjectStoreError::Backend(format!(
                "Supabase delete failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, ObjectStoreError> {
        check_key(key)?;

        let resp = self
            .authorized(self.client.head(self.object_url(key)))
            .send()
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;

        Ok(resp.status().is_success())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls() {
        let store = SupabaseStore::new("https://abc.supabase.co/", "key", "media").unwrap();
        assert_eq!(
            store.object_url("1-a.png"),
            "https://abc.supabase.co/storage/v1/object/media/1-a.png"
        );
        assert_eq!(
            store.public_url("1-a.png"),
            "https://abc.supabase.co/storage/v1/object/public/media/1-a.png"
        );
    }
}
