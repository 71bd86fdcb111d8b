//! Client construction: API key, base URL and the HTTP session.

use reqwest::{Client, Url};
use std::env;
use std::fmt;
use std::sync::Arc;

use crate::error::{OnypheError, Result};
use crate::http::HttpClient;
use crate::pipeline::Pipeline;
use crate::version::ApiVersion;
use crate::{v1, v2};

/// Production endpoint of the service.
pub const DEFAULT_BASE_URL: &str = "https://www.onyphe.io/api/";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ONYPHE_API_KEY";

/// Optional environment variable overriding [`DEFAULT_BASE_URL`].
pub const API_URL_ENV: &str = "ONYPHE_API_URL";

/// Builder for [`v1::Client`] and [`v2::Client`].
///
/// ```no_run
/// use onyphe_client::ClientBuilder;
///
/// let client = ClientBuilder::new("my-api-key")
///     .user_agent("threat-feed/1.0")
///     .build_v2()?;
/// # Ok::<(), onyphe_client::OnypheError>(())
/// ```
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: Option<String>,
    http_client: Option<Client>,
    user_agent: Option<String>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            http_client: None,
            user_agent: None,
        }
    }

    /// Reads the key from `ONYPHE_API_KEY` and, if set, the base URL from `ONYPHE_API_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                OnypheError::invalid_argument(format!("{} is not set", API_KEY_ENV))
            })?;

        let mut builder = Self::new(api_key);
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            builder = builder.base_url(url);
        }
        Ok(builder)
    }

    /// Overrides the service root, e.g. for a proxy or a test server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Uses a pre-configured session (timeouts, proxies, TLS). Takes precedence over `user_agent`.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build_v1(self) -> Result<v1::Client> {
        Ok(v1::Client::from_pipeline(self.build(ApiVersion::V1)?))
    }

    pub fn build_v2(self) -> Result<v2::Client> {
        Ok(v2::Client::from_pipeline(self.build(ApiVersion::V2)?))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn build(self, version: ApiVersion) -> Result<Pipeline> {
        if self.api_key.trim().is_empty() {
            return Err(OnypheError::invalid_argument("API key is empty"));
        }

        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(self.user_agent.unwrap_or_else(default_user_agent))
                .build()
                .map_err(|e| {
                    OnypheError::invalid_argument(format!("failed to build HTTP client: {}", e))
                })?,
        };

        Ok(Pipeline::new(
            self.api_key,
            base_url,
            version,
            Arc::new(HttpClient::new(client)),
        ))
    }
}

pub fn default_user_agent() -> String {
    format!("onyphe-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Parses a base URL and makes sure its path ends with `/`, so joining keeps the last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| OnypheError::invalid_argument(format!("invalid base URL '{}': {}", raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(OnypheError::invalid_argument(format!(
            "base URL '{}' cannot be used as a base",
            raw
        )));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_normalize_base_url_adds_trailing_slash() {
        let url = normalize_base_url("https://www.onyphe.io/api").unwrap();
        assert_eq!(url.as_str(), "https://www.onyphe.io/api/");

        let url = normalize_base_url("http://127.0.0.1:1234").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/");
    }

    #[test]
    fn test_normalize_base_url_drops_query_and_fragment() {
        let url = normalize_base_url("https://proxy.local/onyphe/?x=1#top").unwrap();
        assert_eq!(url.as_str(), "https://proxy.local/onyphe/");
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(OnypheError::InvalidArgument(_))
        ));
        assert!(matches!(
            normalize_base_url("mailto:someone@example.com"),
            Err(OnypheError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_build_uses_default_base_url() {
        let pipeline = ClientBuilder::new("key").build(ApiVersion::V1).unwrap();
        assert_eq!(pipeline.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(pipeline.version(), ApiVersion::V1);
    }

    #[test]
    fn test_build_rejects_empty_key() {
        let err = ClientBuilder::new("  ").build(ApiVersion::V2).unwrap_err();
        assert_eq!(
            err,
            OnypheError::InvalidArgument("API key is empty".to_string())
        );
    }

    #[test]
    fn test_build_with_custom_client_and_url() {
        let pipeline = ClientBuilder::new("key")
            .base_url("http://localhost:8080/api")
            .http_client(Client::new())
            .build(ApiVersion::V2)
            .unwrap();
        assert_eq!(pipeline.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(pipeline.version(), ApiVersion::V2);
    }

    #[test]
    fn test_from_lookup_reads_key_and_url() {
        let builder = ClientBuilder::from_lookup(lookup_from(&[
            (API_KEY_ENV, "env-key"),
            (API_URL_ENV, "http://localhost:9000/"),
        ]))
        .unwrap();
        assert_eq!(builder.api_key, "env-key");
        assert_eq!(builder.base_url.as_deref(), Some("http://localhost:9000/"));
    }

    #[test]
    fn test_from_lookup_without_url_uses_default() {
        let builder = ClientBuilder::from_lookup(lookup_from(&[(API_KEY_ENV, "env-key")])).unwrap();
        assert_eq!(builder.base_url, None);
    }

    #[test]
    fn test_from_lookup_requires_key() {
        let err = ClientBuilder::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));

        let err = ClientBuilder::from_lookup(lookup_from(&[(API_KEY_ENV, "")])).unwrap_err();
        assert!(matches!(err, OnypheError::InvalidArgument(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let builder = ClientBuilder::new("super-secret");
        assert!(!format!("{:?}", builder).contains("super-secret"));
    }

    #[test]
    fn test_default_user_agent() {
        assert!(default_user_agent().starts_with("onyphe-client/"));
    }
}
