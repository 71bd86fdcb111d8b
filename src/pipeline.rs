//! The request pipeline shared by every endpoint method.
//!
//! A call goes through the same steps regardless of endpoint or API version:
//! resolve the URL against the base, attach `apikey` (and `page` when given),
//! send one GET, classify the status, decode the body as JSON.

use log::debug;
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{OnypheError, Result};
use crate::http::{Transport, check_status};
use crate::version::{ApiVersion, VersionProfile};

/// Query parameter name carrying the API key.
pub const API_KEY_PARAM: &str = "apikey";

/// Query parameter name for result pagination.
pub const PAGE_PARAM: &str = "page";

/// Owns the credential, the base URL, the version profile and the session.
#[derive(Clone)]
pub struct Pipeline {
    api_key: String,
    base_url: Url,
    version: ApiVersion,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// `base_url` should already be normalized (see [`crate::config::normalize_base_url`]).
    pub fn new(
        api_key: impl Into<String>,
        base_url: Url,
        version: ApiVersion,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            version,
            transport,
        }
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn profile(&self) -> &'static VersionProfile {
        self.version.profile()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `target` against the base URL.
    ///
    /// Relative targets are appended to the base path; an absolute URL replaces the base.
    pub fn resolve(&self, target: &str) -> Result<Url> {
        self.base_url.join(target).map_err(|e| {
            OnypheError::invalid_argument(format!("cannot resolve '{}': {}", target, e))
        })
    }

    /// Absolute URL for an endpoint, with the version tag as first segment.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut path = String::from(self.profile().prefix);
        for segment in segments {
            path.push('/');
            path.push_str(segment);
        }
        self.resolve(&path)
    }

    fn query(&self, page: Option<u32>) -> Vec<(&'static str, String)> {
        let mut query = vec![(API_KEY_PARAM, self.api_key.clone())];
        if let Some(page) = page {
            query.push((PAGE_PARAM, page.to_string()));
        }
        query
    }

    /// Runs one GET against `<version>/<segments...>` and decodes the result.
    ///
    /// Segments are joined verbatim: free text must already be percent-encoded.
    /// Falsy JSON (`null`, `false`, `0`, `""`, `{}`, `[]`) comes back as `None`.
    #[tracing::instrument(skip(self), fields(version = %self.version))]
    pub async fn execute(&self, segments: &[&str], page: Option<u32>) -> Result<Option<Value>> {
        let url = self.endpoint_url(segments)?;

        debug!("Requesting {} (page {:?})...", url, page);

        let response = self.transport.get(url.clone(), self.query(page)).await?;

        check_status(response.status, &response.body, &url, self.profile())?;

        let value: Value = serde_json::from_slice(&response.body)
            .map_err(|e| OnypheError::MalformedResponse(e.to_string()))?;

        if is_falsy(&value) {
            debug!("{} returned an empty result", url);
            return Ok(None);
        }

        Ok(Some(value))
    }
}

/// JSON values that count as "no result".
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
