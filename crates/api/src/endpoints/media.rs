//! Media upload endpoints.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Router,
};
use blogr_common::{AppError, AppResult, StoredFile};
use serde::Serialize;
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Stored media response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub key: String,
    pub url: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub md5: String,
}

impl From<StoredFile> for MediaResponse {
    fn from(f: StoredFile) -> Self {
        Self {
            key: f.key,
            url: f.url,
            size: f.size,
            content_type: f.content_type,
            md5: f.md5,
        }
    }
}

/// Upload an image via multipart form. The file goes in a `file` field.
async fn upload(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<MediaResponse>> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some(bytes.to_vec());
        }
    }

    let data = file_data.ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;

    info!(user_id = %user.id, size = data.len(), "Uploading media");

    let stored = state.media_service.upload(&data).await?;

    Ok(ApiResponse::ok(stored.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}
