//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard API success envelope. Error bodies are produced by
/// `AppError::into_response`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Page of items with the total count before paging.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T: Serialize> Paginated<T> {
    /// Assemble a page from already-fetched items.
    pub fn new(items: Vec<T>, total: u64, limit: u64, offset: u64) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_wraps_data() {
        let response = ApiResponse::ok("hello");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"data":"hello"}"#);
    }

    #[test]
    fn test_paginated_serializes_camel_case() {
        let page = Paginated::new(vec![1, 2, 3], 10, 3, 0);
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains(r#""total":10"#));
        assert!(json.contains(r#""items":[1,2,3]"#));
    }
}
