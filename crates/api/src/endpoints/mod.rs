//! API endpoints.

mod auth;
mod categories;
mod comments;
mod locations;
mod media;
mod posts;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .nest("/comments", comments::router())
        .nest("/categories", categories::router())
        .nest("/locations", locations::router())
        .nest("/users", users::router())
        .nest("/media", media::router())
}
