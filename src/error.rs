//! Error taxonomy and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::http::response::ApiResponse;

/// One violated field in a validation failure.
#[derive(Clone, Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed or missing input. Carries every violated field, not just the
    /// first one.
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// Referenced product or line item does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Stock insufficient for the requested quantity.
    #[error("{0}")]
    Conflict(String),

    /// Persistence failure. Opaque to clients; details go to the log only.
    #[error("storage failure")]
    Storage(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }
}

impl From<JsonRejection> for StoreError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(vec![FieldError {
            field: "body".into(),
            message: rejection.body_text(),
        }])
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match self {
            Self::Validation(errors) => {
                ApiResponse::failure_with_errors("Validation error", errors)
            }
            Self::NotFound(message) | Self::Conflict(message) => ApiResponse::failure(message),
            Self::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                ApiResponse::failure("Internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}
