use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use super::{check_key, ObjectStore, ObjectStoreError};

/// Local filesystem media store. Files are served by the app under
/// `public_base`.
pub struct LocalStore {
    base_path: PathBuf,
    public_base: String,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, std::io::Error> {
        Self::with_public_base(base_path, "/uploads")
    }

    pub fn with_public_base<P: AsRef<Path>>(
        base_path: P,
        public_base: &str,
    ) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            public_base: public_base.trim_end_matches('/').to_string(),
        })
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, ObjectStoreError> {
        check_key(key)?;
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> Result<(), ObjectStoreError> {
        let path = self.object_path(key)?;
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(ObjectStoreError::AlreadyExists(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        tokio::io::AsyncWriteExt::write_all(&mut file, &data).await?;
        tokio::io::AsyncWriteExt::flush(&mut file).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, ObjectStoreError> {
        let path = self.object_path(key)?;
        if !path.exists() {
            return Err(ObjectStoreError::NotFound(key.to_string()));
        }
        let data = tokio::fs::read(&path).await?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError> {
        let path = self.object_path(key)?;
        if path.exists() {
            tokio::fs::remove_file(&path).await?;
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, ObjectStoreError> {
        let path = self.object_path(key)?;
        Ok(path.exists())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}
