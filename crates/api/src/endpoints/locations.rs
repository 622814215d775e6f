//! Location endpoints.

use axum::{extract::State, routing::post, Json, Router};
use blogr_common::AppResult;
use blogr_db::entities::location;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

// ==================== Request/Response Types ====================

/// Location response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: String,
    pub name: String,
    pub is_published: bool,
    pub created_at: String,
}

impl From<location::Model> for LocationResponse {
    fn from(l: location::Model) -> Self {
        Self {
            id: l.id,
            name: l.name,
            is_published: l.is_published,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

/// Create location request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    pub name: String,
    pub is_published: Option<bool>,
}

/// Update location request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub location_id: String,
    pub name: Option<String>,
    pub is_published: Option<bool>,
}

/// Delete location request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLocationRequest {
    pub location_id: String,
}

// ==================== Handlers ====================

/// List published locations.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<LocationResponse>>> {
    let locations = state.location_service.list_published().await?;

    Ok(ApiResponse::ok(
        locations.into_iter().map(Into::into).collect(),
    ))
}

/// Create a location. Administrators only.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateLocationRequest>,
) -> AppResult<ApiResponse<LocationResponse>> {
    let input = blogr_core::CreateLocationInput {
        name: req.name,
        is_published: req.is_published,
    };

    let location = state.location_service.create(&user, input).await?;

    Ok(ApiResponse::ok(location.into()))
}

/// Update a location. Administrators only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateLocationRequest>,
) -> AppResult<ApiResponse<LocationResponse>> {
    let input = blogr_core::UpdateLocationInput {
        name: req.name,
        is_published: req.is_published,
    };

    let location = state
        .location_service
        .update(&user, &req.location_id, input)
        .await?;

    Ok(ApiResponse::ok(location.into()))
}

/// Delete a location. Administrators only.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteLocationRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .location_service
        .delete(&user, &req.location_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
