//! Comment endpoints.

use axum::{extract::State, routing::post, Json, Router};
use blogr_common::AppResult;
use blogr_db::entities::comment;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::{ApiResponse, Paginated},
};

// ==================== Request/Response Types ====================

/// Comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub post_id: String,
    pub author_id: String,
    pub text: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.map(|t| t.to_rfc3339()),
            post_id: c.post_id,
            author_id: c.author_id,
            text: c.text,
        }
    }
}

/// Create comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: String,
    pub text: String,
}

/// Update comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub comment_id: String,
    pub text: String,
}

/// Delete comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub comment_id: String,
}

/// List comments request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsRequest {
    pub post_id: String,
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
}

// ==================== Handlers ====================

/// Comment on a post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let input = blogr_core::CreateCommentInput {
        post_id: req.post_id,
        text: req.text,
    };

    let comment = state.comment_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(comment.into()))
}

/// Edit a comment.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateCommentRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let input = blogr_core::UpdateCommentInput { text: req.text };

    let comment = state
        .comment_service
        .update(&req.comment_id, &user.id, input)
        .await?;

    Ok(ApiResponse::ok(comment.into()))
}

/// Delete a comment.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteCommentRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .comment_service
        .delete(&req.comment_id, &user.id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// List comments on a post, oldest first.
async fn list(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListCommentsRequest>,
) -> AppResult<ApiResponse<Paginated<CommentResponse>>> {
    let limit = state.pagination.page_limit(req.limit);
    let (comments, total) = state
        .comment_service
        .list_for_post(
            &req.post_id,
            viewer.as_ref().map(|u| u.id.as_str()),
            limit,
            req.offset,
        )
        .await?;

    Ok(ApiResponse::ok(Paginated::new(
        comments.into_iter().map(Into::into).collect(),
        total,
        limit,
        req.offset,
    )))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
        .route("/list", post(list))
}
