//! Category endpoints.

use axum::{extract::State, routing::post, Json, Router};
use blogr_common::AppResult;
use blogr_db::entities::category;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Category response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(c: category::Model) -> Self {
        Self {
            id: c.id,
            slug: c.slug,
            title: c.title,
            description: c.description,
            is_published: c.is_published,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Show category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowCategoryRequest {
    pub slug: String,
}

/// Create category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_published: Option<bool>,
}

/// Update category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub category_id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub is_published: Option<bool>,
}

/// Delete category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryRequest {
    pub category_id: String,
}

// ==================== Handlers ====================

/// List published categories.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<CategoryResponse>>> {
    let categories = state.category_service.list_published().await?;

    Ok(ApiResponse::ok(
        categories.into_iter().map(Into::into).collect(),
    ))
}

/// Show a published category by slug.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowCategoryRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = state
        .category_service
        .get_published_by_slug(&req.slug)
        .await?;

    Ok(ApiResponse::ok(category.into()))
}

/// Create a category. Administrators only.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    info!(user_id = %user.id, title = %req.title, "Creating category");

    let input = blogr_core::CreateCategoryInput {
        title: req.title,
        slug: req.slug,
        description: req.description,
        is_published: req.is_published,
    };

    let category = state.category_service.create(&user, input).await?;

    Ok(ApiResponse::ok(category.into()))
}

/// Update a category. Administrators only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateCategoryRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let input = blogr_core::UpdateCategoryInput {
        title: req.title,
        slug: req.slug,
        description: req.description,
        is_published: req.is_published,
    };

    let category = state
        .category_service
        .update(&user, &req.category_id, input)
        .await?;

    Ok(ApiResponse::ok(category.into()))
}

/// Delete a category. Administrators only.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteCategoryRequest>,
) -> AppResult<ApiResponse<()>> {
    info!(user_id = %user.id, category_id = %req.category_id, "Deleting category");

    state
        .category_service
        .delete(&user, &req.category_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/show", post(show))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
