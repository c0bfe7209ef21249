use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::services::{CatalogError, FeedbackError, FieldErrors};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    /// One or more submitted fields were rejected.
    ValidationError(FieldErrors),

    /// The request body or query string could not be decoded at all.
    MalformedRequest(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(errors) => write!(f, "Validation error: {}", errors),
            ApiError::MalformedRequest(msg) => write!(f, "Malformed request: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::detail(msg)),
            ApiError::ValidationError(errors) => {
                (StatusCode::BAD_REQUEST, ErrorBody::validation(errors))
            }
            ApiError::MalformedRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::validation(FieldErrors::single(NON_FIELD_ERRORS, msg)),
            ),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::detail("A database error occurred"),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::detail("An internal error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MovieNotFound(_) | CatalogError::ActorNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CatalogError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<FeedbackError> for ApiError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Validation(errors) => Self::ValidationError(errors),
            FeedbackError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        ApiError::MalformedRequest(msg.into())
    }

    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }
}
