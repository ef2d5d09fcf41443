//! Unified error type for the seeding client.
//!
//! Every HTTP call, login and payload decode returns [`Result`]. The seeding
//! loops never propagate these upward; they fold them into the run report.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while talking to the platform API or loading settings.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Connection error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{status} - {body}")]
    Status {
        /// HTTP status returned by the API
        status: StatusCode,
        /// Raw response body, kept for the failure line
        body: String,
    },

    /// A response body lacked a field the client depends on
    #[error("Field `{field}` not found in response: {body}")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
        /// Raw response body
        body: String,
    },

    /// A response body was not the JSON shape expected
    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// Console I/O failed (operator prompt)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Whether the API rejected the request because the resource already exists.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::CONFLICT)
    }

    /// HTTP status carried by the error, if the API answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_detected_by_status_only() {
        let conflict = Error::Status {
            status: StatusCode::CONFLICT,
            body: "{}".to_string(),
        };
        let other = Error::Status {
            status: StatusCode::BAD_REQUEST,
            body: "This item is already in favorites".to_string(),
        };

        assert!(conflict.is_conflict());
        assert!(!other.is_conflict());
    }

    #[test]
    fn test_status_display_matches_failure_line() {
        let err = Error::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "401 Unauthorized - Unauthorized");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }
}
