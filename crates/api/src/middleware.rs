//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use blogr_common::PaginationConfig;
use blogr_core::{
    CategoryService, CommentService, LocationService, MediaService, PostService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub post_service: PostService,
    pub comment_service: CommentService,
    pub category_service: CategoryService,
    pub location_service: LocationService,
    pub media_service: MediaService,
    pub pagination: PaginationConfig,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to a user and stashes it in the request
/// extensions. Requests with no token or a stale token pass through
/// anonymously; endpoints that need a user reject them via `AuthUser`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.user_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
