//! Sync layer error types
//!
//! Every failure the dashboard client can hit, from a rejected form to a
//! non-success status from the remote store.

use thiserror::Error;

use super::types::Collection;

/// Errors that can occur while reading or writing a remote collection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Non-success status from the store. Displays the response body verbatim.
    #[error("{body}")]
    Remote { status: u16, body: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// A form failed its presence or number checks; nothing was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store has no delete endpoint for this collection
    #[error("{0} records cannot be deleted")]
    NotDeletable(Collection),
}

impl SyncError {
    /// HTTP status of a remote rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Network("request timed out".to_string())
        } else if err.is_connect() {
            SyncError::Network(format!("store unreachable: {}", err))
        } else if err.is_decode() {
            SyncError::Decode(err.to_string())
        } else {
            SyncError::Network(err.to_string())
        }
    }
}

/// Form input rejected before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_shows_body_verbatim() {
        let err = SyncError::Remote {
            status: 404,
            body: "habit 7 not found".to_string(),
        };
        assert_eq!(err.to_string(), "habit 7 not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_validation_display() {
        let err: SyncError = ValidationError::MissingField("title").into();
        assert_eq!(err.to_string(), "Validation error: title is required");

        let err = ValidationError::OutOfRange {
            field: "progress",
            value: 120,
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "progress must be between 0 and 100, got 120");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<i64>>("{").unwrap_err();
        let err: SyncError = json_err.into();
        assert!(matches!(err, SyncError::Decode(_)));
    }
}
