//! Post endpoints.

use axum::{extract::State, routing::post, Json, Router};
use blogr_common::AppResult;
use blogr_db::entities::post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::{ApiResponse, Paginated},
};

use super::categories::CategoryResponse;

// ==================== Request/Response Types ====================

/// Post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub author_id: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_published: bool,
    pub published_at: String,
    pub comments_count: i32,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.map(|t| t.to_rfc3339()),
            author_id: p.author_id,
            category_id: p.category_id,
            location_id: p.location_id,
            title: p.title,
            text: p.text,
            image_url: p.image_url,
            is_published: p.is_published,
            published_at: p.published_at.to_rfc3339(),
            comments_count: p.comments_count,
        }
    }
}

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub text: String,
    pub category_id: String,
    pub location_id: Option<String>,
    pub image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
}

/// Update post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub post_id: String,
    pub title: Option<String>,
    pub text: Option<String>,
    pub category_id: Option<String>,
    pub location_id: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
}

/// Delete post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub post_id: String,
}

/// Show post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPostRequest {
    pub post_id: String,
}

/// Feed request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
}

/// Posts by category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByCategoryRequest {
    pub slug: String,
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
}

/// Posts by user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByUserRequest {
    pub user_id: String,
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
}

/// Category page response: the category and a page of its posts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPostsResponse {
    pub category: CategoryResponse,
    pub posts: Paginated<PostResponse>,
}

// ==================== Handlers ====================

/// Create a new post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    info!(user_id = %user.id, "Creating post");

    let input = blogr_core::CreatePostInput {
        title: req.title,
        text: req.text,
        category_id: req.category_id,
        location_id: req.location_id,
        image_url: req.image_url,
        published_at: req.published_at,
        is_published: req.is_published,
    };

    let post = state.post_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Update a post.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let input = blogr_core::UpdatePostInput {
        title: req.title,
        text: req.text,
        category_id: req.category_id,
        location_id: req.location_id,
        image_url: req.image_url,
        published_at: req.published_at,
        is_published: req.is_published,
    };

    let post = state
        .post_service
        .update(&req.post_id, &user.id, input)
        .await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Delete a post.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeletePostRequest>,
) -> AppResult<ApiResponse<()>> {
    info!(user_id = %user.id, post_id = %req.post_id, "Deleting post");

    state.post_service.delete(&req.post_id, &user.id).await?;

    Ok(ApiResponse::ok(()))
}

/// Show a post.
async fn show(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state
        .post_service
        .get_visible(&req.post_id, viewer.as_ref().map(|u| u.id.as_str()))
        .await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Public feed, newest first.
async fn feed(
    State(state): State<AppState>,
    Json(req): Json<FeedRequest>,
) -> AppResult<ApiResponse<Paginated<PostResponse>>> {
    let limit = state.pagination.page_limit(req.limit);
    let (posts, total) = state.post_service.feed(limit, req.offset).await?;

    Ok(ApiResponse::ok(Paginated::new(
        posts.into_iter().map(Into::into).collect(),
        total,
        limit,
        req.offset,
    )))
}

/// Published posts in a category.
async fn by_category(
    State(state): State<AppState>,
    Json(req): Json<ByCategoryRequest>,
) -> AppResult<ApiResponse<CategoryPostsResponse>> {
    let limit = state.pagination.page_limit(req.limit);
    let (category, posts, total) = state
        .post_service
        .list_by_category(&req.slug, limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(CategoryPostsResponse {
        category: category.into(),
        posts: Paginated::new(
            posts.into_iter().map(Into::into).collect(),
            total,
            limit,
            req.offset,
        ),
    }))
}

/// Posts by an author. The author sees all of their posts, everyone
/// else only the visible ones.
async fn by_user(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ByUserRequest>,
) -> AppResult<ApiResponse<Paginated<PostResponse>>> {
    let limit = state.pagination.page_limit(req.limit);
    let (posts, total) = state
        .post_service
        .list_by_author(
            &req.user_id,
            viewer.as_ref().map(|u| u.id.as_str()),
            limit,
            req.offset,
        )
        .await?;

    Ok(ApiResponse::ok(Paginated::new(
        posts.into_iter().map(Into::into).collect(),
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
        .route("/show", post(show))
        .route("/feed", post(feed))
        .route("/by-category", post(by_category))
        .route("/by-user", post(by_user))
}
