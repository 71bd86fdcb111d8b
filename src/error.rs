//! Error taxonomy for ONYPHE API calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for ONYPHE client operations.
pub type Result<T> = std::result::Result<T, OnypheError>;

/// Every failure a call can surface. None of these are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OnypheError {
    /// The request never got a response (DNS, refused connection, timeout, broken body).
    #[error("Unable to connect to Onyphe: {0}")]
    ConnectionFailed(String),

    /// HTTP 404. Carries the resolved URL, never the query string.
    #[error("Page Not found {url}")]
    NotFound { url: String },

    /// HTTP 403
    #[error("Access Forbidden")]
    Forbidden,

    /// HTTP 429, only reported by API versions that distinguish it.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Any other non-200 status.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// HTTP 200 with a body that is not JSON.
    #[error("Unable to parse JSON: {0}")]
    MalformedResponse(String),

    /// Rejected locally before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl OnypheError {
    pub fn connection_failed(detail: impl Into<String>) -> Self {
        Self::ConnectionFailed(detail.into())
    }

    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    pub fn request_failed(status: StatusCode, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            OnypheError::NotFound { .. } => Some(404),
            OnypheError::Forbidden => Some(403),
            OnypheError::RateLimited => Some(429),
            OnypheError::RequestFailed { status, .. } => Some(*status),
            OnypheError::MalformedResponse(_) => Some(200),
            OnypheError::ConnectionFailed(_) | OnypheError::InvalidArgument(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_includes_url() {
        let err = OnypheError::NotFound {
            url: "https://www.onyphe.io/api/v1/ip/8.8.8.8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Page Not found https://www.onyphe.io/api/v1/ip/8.8.8.8"
        );
    }

    #[test]
    fn test_request_failed_display_is_message() {
        let err = OnypheError::request_failed(StatusCode::BAD_REQUEST, "bad query");
        assert_eq!(err.to_string(), "bad query");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(OnypheError::Forbidden.status(), Some(403));
        assert_eq!(OnypheError::RateLimited.status(), Some(429));
        assert_eq!(OnypheError::connection_failed("refused").status(), None);
        assert_eq!(OnypheError::invalid_argument("empty").status(), None);
    }

    #[test]
    fn test_connection_failed_display() {
        let err = OnypheError::connection_failed("connection refused");
        assert!(err.to_string().contains("Unable to connect to Onyphe"));
        assert!(err.to_string().contains("connection refused"));
    }
}
