//! File storage for post images.
//!
//! Uploaded images are written under a base directory and served from a
//! configurable URL prefix.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Stored file metadata.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Storage key (relative path under the base directory).
    pub key: String,
    /// Public URL to access the file.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME content type.
    pub content_type: String,
    /// MD5 hash of the file.
    pub md5: String,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upload a file.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredFile>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredFile> {
        let path = self.base_path.join(key);

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {e}")))?;

        let md5 = format!("{:x}", md5::compute(data));

        Ok(StoredFile {
            key: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to delete file: {e}"))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        Ok(tokio::fs::try_exists(&path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to stat file: {e}")))?)
    }
}

/// Generate a storage key for an uploaded file.
///
/// Keys are sharded by the first two characters of the file ID to keep
/// directory sizes bounded.
#[must_use]
pub fn generate_storage_key(file_id: &str, extension: &str) -> String {
    let shard = &file_id[..file_id.len().min(2)];
    format!("{shard}/{file_id}.{extension}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_storage_key() {
        let key = generate_storage_key("01h2xcejqtf2nbrexx3vqjhp41", "png");
        assert_eq!(key, "01/01h2xcejqtf2nbrexx3vqjhp41.png");
    }

    #[test]
    fn test_public_url_no_double_slash() {
        let storage = LocalStorage::new(PathBuf::from("/tmp/media"), "/media/".to_string());
        assert_eq!(storage.public_url("ab/file.png"), "/media/ab/file.png");
    }

    #[tokio::test]
    async fn test_upload_and_delete_roundtrip() {
        let dir = std::env::temp_dir().join(format!("blogr-storage-{}", uuid::Uuid::new_v4()));
        let storage = LocalStorage::new(dir.clone(), "/media".to_string());

        let file = storage
            .upload("ab/test.png", b"fake image bytes", "image/png")
            .await
            .unwrap();

        assert_eq!(file.url, "/media/ab/test.png");
        assert_eq!(file.size, 16);
        assert!(storage.exists("ab/test.png").await.unwrap());

        storage.delete("ab/test.png").await.unwrap();
        assert!(!storage.exists("ab/test.png").await.unwrap());

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = std::env::temp_dir().join(format!("blogr-storage-{}", uuid::Uuid::new_v4()));
        let storage = LocalStorage::new(dir, "/media".to_string());

        assert!(storage.delete("no/such-file.png").await.is_ok());
    }
}
