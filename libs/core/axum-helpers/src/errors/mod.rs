pub mod handlers;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

/// Field-scoped validation report: field name mapped to a human-readable
/// message, one entry per failing field.
pub type FieldErrors = BTreeMap<String, String>;

/// Generic text returned for unexpected failures. Internal detail never
/// reaches the caller; it goes to the operational log only.
const INTERNAL_ERROR_BODY: &str = "An unexpected error occurred. Please contact support.";

/// Flatten `validator` output into a [`FieldErrors`] map.
///
/// Only the first violation per field is reported, matching the
/// one-message-per-field contract of the API.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, violations)| {
            let violation = violations.first()?;
            let message = violation
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| violation.code.to_string());
            Some((field.to_string(), message))
        })
        .collect()
}

/// Application error type that can be converted to HTTP responses.
///
/// Every handler failure funnels through this enum so the mapping from
/// failure category to status code lives in exactly one place.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                // Malformed body shape/type is a client error, always 400.
                (StatusCode::BAD_REQUEST, e.body_text()).into_response()
            }
            AppError::Validation(fields) => {
                tracing::info!("Validation error: {:?}", fields);
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, msg).into_response()
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_BODY.to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "must not be blank"))]
        name: String,
        #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
        quantity: i32,
    }

    #[test]
    fn test_field_errors_one_entry_per_failing_field() {
        let payload = Payload {
            name: String::new(),
            quantity: -1,
        };

        let fields = field_errors(&payload.validate().unwrap_err());
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["name"], "must not be blank");
        assert_eq!(fields["quantity"], "must be greater than or equal to 0");
    }

    #[test]
    fn test_field_errors_empty_for_valid_payload() {
        let payload = Payload {
            name: "ok".to_string(),
            quantity: 0,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_not_found_response_has_empty_body() {
        let response = AppError::NotFound("Product 7 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response =
            AppError::InternalServerError("connection refused (10.0.0.3:5432)".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
