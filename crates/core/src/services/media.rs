//! Media upload service.

use std::sync::Arc;

use blogr_common::{
    generate_storage_key, AppError, AppResult, IdGenerator, StorageBackend, StoredFile,
};
use image::ImageFormat;

/// Media service handling image uploads for posts.
#[derive(Clone)]
pub struct MediaService {
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
    max_upload_size: u64,
}

const fn format_metadata(format: ImageFormat) -> Option<(&'static str, &'static str)> {
    match format {
        ImageFormat::Jpeg => Some(("jpg", "image/jpeg")),
        ImageFormat::Png => Some(("png", "image/png")),
        ImageFormat::Gif => Some(("gif", "image/gif")),
        ImageFormat::WebP => Some(("webp", "image/webp")),
        _ => None,
    }
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>, max_upload_size: u64) -> Self {
        Self {
            storage,
            id_gen: IdGenerator::new(),
            max_upload_size,
        }
    }

    /// Store an uploaded image.
    ///
    /// The format is sniffed from the file contents, never trusted from
    /// the client. Only JPEG, PNG, GIF and WebP are accepted.
    pub async fn upload(&self, data: &[u8]) -> AppResult<StoredFile> {
        if data.is_empty() {
            return Err(AppError::BadRequest("Empty upload".to_string()));
        }

        if data.len() as u64 > self.max_upload_size {
            return Err(AppError::BadRequest(format!(
                "Upload exceeds the {} byte limit",
                self.max_upload_size
            )));
        }

        let format = image::guess_format(data)
            .map_err(|_| AppError::BadRequest("Unrecognized image format".to_string()))?;

        let (extension, content_type) = format_metadata(format)
            .ok_or_else(|| AppError::BadRequest("Unsupported image format".to_string()))?;

        let key = generate_storage_key(&self.id_gen.generate(), extension);
        self.storage.upload(&key, data, content_type).await
    }

    /// Remove a previously stored file.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.storage.delete(key).await
    }
}
