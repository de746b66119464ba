use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors, field_errors};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Concurrent modification of product {id}: version {supplied} is stale (stored version is {stored})")]
    Conflict { id: i64, supplied: i64, stored: i64 },

    #[error("Invalid input on {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        ProductError::Validation(field_errors(&errors))
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            conflict @ ProductError::Conflict { .. } => AppError::Conflict(conflict.to_string()),
            ProductError::Validation(fields) => AppError::Validation(fields),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
