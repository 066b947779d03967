use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{users::repo::StoreError, validation::FieldError};

/// Everything a request can fail with, mapped to a status code in one place.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// Backend failure; its message is returned to the client as-is.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Body(#[from] BytesRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Body(r) => r.status(),
            AppError::Path(r) => r.status(),
            AppError::Store(_) | AppError::PasswordHash(_) | AppError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(errors) => (status, Json(json!({ "errors": errors }))).into_response(),
            AppError::NotFound(msg) | AppError::Unauthorized(msg) => {
                (status, Json(json!({ "message": msg }))).into_response()
            }
            AppError::Body(rejection) => rejection.into_response(),
            AppError::Path(rejection) => rejection.into_response(),
            other => {
                error!(error = %other, "request failed");
                (status, Json(json!({ "message": other.to_string() }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_map_to_client_statuses() {
        assert_eq!(AppError::NotFound("User not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized("Invalid password").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_errors_are_500_with_raw_message() {
        let err = AppError::from(StoreError::RecordNotFound { action: "delete", id: 7 });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("7"));
    }
}
