//! HTTP API layer for blogr.
//!
//! This crate provides the JSON API:
//!
//! - **Endpoints**: RPC-style POST routes under `/api`
//! - **Extractors**: Authentication
//! - **Middleware**: Token authentication, shared state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
