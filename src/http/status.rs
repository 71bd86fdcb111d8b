//! Maps HTTP status codes onto the error taxonomy.

use log::warn;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::error::{OnypheError, Result};
use crate::version::VersionProfile;

/// Returns `Ok(())` for HTTP 200, otherwise the error matching the status.
pub fn check_status(
    status: StatusCode,
    body: &[u8],
    url: &Url,
    profile: &VersionProfile,
) -> Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(OnypheError::NotFound {
            url: url.to_string(),
        }),
        StatusCode::FORBIDDEN => Err(OnypheError::Forbidden),
        StatusCode::TOO_MANY_REQUESTS if profile.distinguishes_rate_limit => {
            Err(OnypheError::RateLimited)
        }
        s => {
            let message = extract_error_message(body, profile.error_field)
                .unwrap_or_else(|| profile.fallback_message.to_string());
            warn!("{} answered HTTP {}: {}", url, s.as_u16(), message);
            Err(OnypheError::request_failed(s, message))
        }
    }
}

/// Reads a string field out of a JSON error body.
pub fn extract_error_message(body: &[u8], field: &str) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get(field)?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::ApiVersion;

    fn url() -> Url {
        Url::parse("https://www.onyphe.io/api/v1/ip/8.8.8.8").unwrap()
    }

    #[test]
    fn test_ok_passes() {
        let profile = ApiVersion::V1.profile();
        assert!(check_status(StatusCode::OK, b"{}", &url(), profile).is_ok());
    }

    #[test]
    fn test_not_found_carries_url() {
        let profile = ApiVersion::V1.profile();
        let err = check_status(StatusCode::NOT_FOUND, b"", &url(), profile).unwrap_err();
        assert_eq!(
            err,
            OnypheError::NotFound {
                url: "https://www.onyphe.io/api/v1/ip/8.8.8.8".to_string()
            }
        );
        assert!(err.to_string().contains("/api/v1/ip/8.8.8.8"));
    }

    #[test]
    fn test_forbidden() {
        for version in [ApiVersion::V1, ApiVersion::V2] {
            let err =
                check_status(StatusCode::FORBIDDEN, b"", &url(), version.profile()).unwrap_err();
            assert_eq!(err, OnypheError::Forbidden);
        }
    }

    #[test]
    fn test_rate_limit_only_distinguished_on_v2() {
        let body = br#"{"message": "slow down", "text": "slow down"}"#;

        let err = check_status(
            StatusCode::TOO_MANY_REQUESTS,
            body,
            &url(),
            ApiVersion::V2.profile(),
        )
        .unwrap_err();
        assert_eq!(err, OnypheError::RateLimited);

        let err = check_status(
            StatusCode::TOO_MANY_REQUESTS,
            body,
            &url(),
            ApiVersion::V1.profile(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            OnypheError::RequestFailed {
                status: 429,
                message: "slow down".to_string()
            }
        );
    }

    #[test]
    fn test_message_field_depends_on_version() {
        let body = br#"{"message": "from v1 field", "text": "from v2 field"}"#;

        let err = check_status(
            StatusCode::BAD_REQUEST,
            body,
            &url(),
            ApiVersion::V1.profile(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "from v1 field");

        let err = check_status(
            StatusCode::BAD_REQUEST,
            body,
            &url(),
            ApiVersion::V2.profile(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "from v2 field");
    }

    #[test]
    fn test_fallback_when_body_is_not_json() {
        let err = check_status(
            StatusCode::UNAUTHORIZED,
            b"<html>denied</html>",
            &url(),
            ApiVersion::V1.profile(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid API key");

        let err = check_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            b"",
            &url(),
            ApiVersion::V2.profile(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_fallback_when_field_missing() {
        // v2 reads "text", so a v1-shaped body falls back.
        let err = check_status(
            StatusCode::BAD_REQUEST,
            br#"{"message": "wrong field"}"#,
            &url(),
            ApiVersion::V2.profile(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[test]
    fn test_extract_error_message_ignores_non_strings() {
        assert_eq!(extract_error_message(br#"{"text": 12}"#, "text"), None);
        assert_eq!(extract_error_message(br#"["text"]"#, "text"), None);
        assert_eq!(
            extract_error_message(br#"{"text": "quota"}"#, "text"),
            Some("quota".to_string())
        );
    }
}
