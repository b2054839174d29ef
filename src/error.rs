use crate::routes::ApiErrorResponse;
use crate::storage::StorageError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(config::ConfigError),
    Storage(StorageError),
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "Configuration error: {}", err),
            AppError::Storage(err) => write!(f, "Storage error: {}", err),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound("Subscription not found".to_string()),
            other => AppError::Storage(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Storage error"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(ApiErrorResponse {
            error: error_message.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let storage_err = AppError::Storage(StorageError::Database("boom".to_string()));
        assert!(storage_err.to_string().contains("Storage error"));

        let validation_err = AppError::Validation("price must not be negative".to_string());
        assert_eq!(
            validation_err.to_string(),
            "Validation error: price must not be negative"
        );

        let not_found_err = AppError::NotFound("Subscription not found".to_string());
        assert_eq!(not_found_err.to_string(), "Not found: Subscription not found");
    }

    #[test]
    fn test_storage_not_found_becomes_app_not_found() {
        let app_err: AppError = StorageError::NotFound.into();
        assert!(matches!(app_err, AppError::NotFound(_)));

        let app_err: AppError = StorageError::Database("down".to_string()).into();
        assert!(matches!(app_err, AppError::Storage(_)));
    }

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (
                AppError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("missing".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Storage(StorageError::Database("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("oops".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
