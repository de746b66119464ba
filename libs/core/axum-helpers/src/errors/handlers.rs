use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}
