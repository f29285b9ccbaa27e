//! API Error Types
//!
//! Errors raised by the mock API handlers. Responses carry the message as a
//! plain-text body, which the dashboard client shows to the user verbatim.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::sync::StoreError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body failed validation
    #[error("{0}")]
    Validation(String),

    /// Unknown record id
    #[error("{0}")]
    NotFound(String),

    /// The path exists but not for this method
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(message) => ApiError::NotFound(message),
            StoreError::Invalid(message) => ApiError::Validation(message),
            StoreError::MethodNotAllowed(message) => ApiError::MethodNotAllowed(message),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::debug!(
                request_id = %request_id,
                status = status.as_u16(),
                error_message = %self,
                "Request rejected"
            );
        }

        let mut response = (status, self.to_string()).into_response();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }
        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
