// ABOUTME: API error type with sanitized JSON responses
// ABOUTME: Maps domain, storage, and security failures to status codes and error codes

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use realworlded_core::{ParseEnumError, ValidationError};
use realworlded_security::SecurityError;
use realworlded_storage::StorageError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Main application error type that all handlers return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl AppError {
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Duplicate(_) => (StatusCode::BAD_REQUEST, "ALREADY_EXISTS"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                StorageError::Duplicate(_) => (StatusCode::BAD_REQUEST, "ALREADY_EXISTS"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// User-facing message, sanitized for external consumption
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Validation failed: {}", msg),
            AppError::BadRequest(msg)
            | AppError::Duplicate(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(resource) => format!("{} not found", resource),
                StorageError::Duplicate(field) => format!("{} already exists", field),
                _ => "Data storage error".to_string(),
            },
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    fn is_server_error(&self) -> bool {
        self.to_status_and_code().0.is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        if self.is_server_error() {
            error!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "Server error occurred"
            );
        } else {
            info!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "API error response"
            );
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code,
                message: self.to_user_message(),
            },
            request_id,
        };

        let mut response = (status_code, Json(body)).into_response();
        if status_code == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ParseEnumError> for AppError {
    fn from(err: ParseEnumError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<SecurityError> for AppError {
    fn from(err: SecurityError) -> Self {
        match err {
            SecurityError::TokenExpired | SecurityError::InvalidToken(_) => {
                AppError::Unauthorized("Could not validate credentials".to_string())
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper constructors for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn session_not_found() -> Self {
        Self::NotFound("Session not found".to_string())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
