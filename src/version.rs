//! API revisions and the small set of behaviors that differ between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OnypheError;

/// Revision of the remote interface. Selects the path prefix and error handling details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

/// Per-version configuration consumed by the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionProfile {
    /// First path segment of every request.
    pub prefix: &'static str,
    /// JSON field holding the server's error text.
    pub error_field: &'static str,
    /// Used when the error body can't be read.
    pub fallback_message: &'static str,
    /// Whether HTTP 429 gets its own error instead of the generic branch.
    pub distinguishes_rate_limit: bool,
}

const V1_PROFILE: VersionProfile = VersionProfile {
    prefix: "v1",
    error_field: "message",
    fallback_message: "Invalid API key",
    distinguishes_rate_limit: false,
};

const V2_PROFILE: VersionProfile = VersionProfile {
    prefix: "v2",
    error_field: "text",
    fallback_message: "Unknown error",
    distinguishes_rate_limit: true,
};

impl ApiVersion {
    pub fn profile(self) -> &'static VersionProfile {
        match self {
            ApiVersion::V1 => &V1_PROFILE,
            ApiVersion::V2 => &V2_PROFILE,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.profile().prefix
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = OnypheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(ApiVersion::V1),
            "v2" | "2" => Ok(ApiVersion::V2),
            other => Err(OnypheError::invalid_argument(format!(
                "unsupported API version '{}'",
                other
            ))),
        }
    }
}
