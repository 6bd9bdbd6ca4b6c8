//! Error types for rate fetching.

use thiserror::Error;

use crate::API_KEY_ENV;

/// Failure category of a [`FetchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Api,
    Unexpected,
}

/// Errors returned by [`crate::RateFetcher::fetch`]
#[derive(Debug, Error)]
pub enum FetchError {
    /// No usable access key. Raised before any request is sent.
    #[error("configuration error: {0}")]
    Config(String),

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport, body or JSON failure
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    pub(crate) fn missing_access_key() -> Self {
        Self::Config(format!(
            "API key not found in environment variable {} or provided as argument",
            API_KEY_ENV
        ))
    }

    pub(crate) fn unexpected(err: impl std::fmt::Display) -> Self {
        Self::Unexpected(err.to_string())
    }

    /// Get the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Api { .. } => ErrorKind::Api,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(FetchError::missing_access_key().kind(), ErrorKind::Config);
        let api = FetchError::Api {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(api.kind(), ErrorKind::Api);
        assert_eq!(api.status(), Some(404));
        assert_eq!(FetchError::unexpected("boom").kind(), ErrorKind::Unexpected);
        assert_eq!(FetchError::unexpected("boom").status(), None);
    }

    #[test]
    fn test_display() {
        let api = FetchError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(api.to_string(), "API error (500): Internal Server Error");
        assert!(FetchError::missing_access_key()
            .to_string()
            .contains(API_KEY_ENV));
    }
}
