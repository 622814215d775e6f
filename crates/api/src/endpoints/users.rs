//! User endpoints.

use axum::{extract::State, routing::post, Json, Router};
use blogr_common::{AppError, AppResult};
use blogr_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::{ApiResponse, Paginated},
};

use super::posts::PostResponse;

// ==================== Request/Response Types ====================

/// Public user profile.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_admin: bool,
    pub posts_count: i32,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            is_admin: u.is_admin,
            posts_count: u.posts_count,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// The calling user's own account, including private fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_admin: bool,
    pub posts_count: i32,
    pub created_at: String,
}

impl From<user::Model> for MeResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            email: u.email,
            is_admin: u.is_admin,
            posts_count: u.posts_count,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Show user request. One of the two selectors is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowUserRequest {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
}

/// Profile page response: the user and a page of their posts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub posts: Paginated<PostResponse>,
}

/// Update own account request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

// ==================== Handlers ====================

/// Show a user's profile by id or username, with a page of their
/// posts. The profile owner sees all of their posts, everyone else
/// only the visible ones.
async fn show(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowUserRequest>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let user = match (req.user_id, req.username) {
        (Some(id), _) => state.user_service.get(&id).await?,
        (None, Some(username)) => state.user_service.get_by_username(&username).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either userId or username is required".to_string(),
            ))
        }
    };

    let limit = state.pagination.page_limit(req.limit);
    let (posts, total) = state
        .post_service
        .list_by_author(
            &user.id,
            viewer.as_ref().map(|u| u.id.as_str()),
            limit,
            req.offset,
        )
        .await?;

    Ok(ApiResponse::ok(ProfileResponse {
        user: user.into(),
        posts: Paginated::new(
            posts.into_iter().map(Into::into).collect(),
            total,
            limit,
            req.offset,
        ),
    }))
}

/// Show the calling user's own account.
async fn me(AuthUser(user): AuthUser) -> AppResult<ApiResponse<MeResponse>> {
    Ok(ApiResponse::ok(user.into()))
}

/// Update the calling user's own account.
async fn update_me(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateMeRequest>,
) -> AppResult<ApiResponse<MeResponse>> {
    let input = blogr_core::UpdateUserInput {
        name: req.name,
        email: req.email,
    };

    let updated = state.user_service.update(&user.id, input).await?;

    Ok(ApiResponse::ok(updated.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/show", post(show))
        .route("/me", post(me))
        .route("/update", post(update_me))
}
