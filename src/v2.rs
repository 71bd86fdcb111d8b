//! Endpoints of the v2 API.
//!
//! v2 groups lookups under `simple/` (one category per call) and `summary/`
//! (every category for one IP, domain or hostname), and offers a single
//! full-text `search` entry point. Error bodies carry their text under
//! `text` and HTTP 429 is reported as [`OnypheError::RateLimited`].
//!
//! [`OnypheError::RateLimited`]: crate::OnypheError::RateLimited

use serde_json::Value;

use crate::config::ClientBuilder;
use crate::error::Result;
use crate::path::{check_identifier, encode_free_text, search_segments};
use crate::pipeline::Pipeline;

/// Client for the v2 API.
#[derive(Debug, Clone)]
pub struct Client {
    pipeline: Pipeline,
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build_v2()
    }

    /// See [`ClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build_v2()
    }

    /// Wraps an existing pipeline, e.g. one built over a custom [`Transport`](crate::http::Transport).
    pub fn from_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Equivalent to `drop(client)`: the HTTP session is released when `self`
    /// goes out of scope here. There is no separate shutdown step.
    pub fn close(self) {
        log::debug!("Closing v2 client for {}", self.pipeline.base_url());
    }

    async fn lookup(&self, prefix: &[&str], kind: &str, value: &str) -> Result<Option<Value>> {
        let value = check_identifier(kind, value)?;
        let mut segments = prefix.to_vec();
        segments.push(value);
        self.pipeline.execute(&segments, None).await
    }

    /// Account details and remaining credits.
    #[tracing::instrument(skip(self))]
    pub async fn user(&self) -> Result<Option<Value>> {
        self.pipeline.execute(&["user"], None).await
    }

    /// Alerts configured on the account.
    #[tracing::instrument(skip(self))]
    pub async fn alert_list(&self) -> Result<Option<Value>> {
        self.pipeline.execute(&["alert", "list"], None).await
    }

    /// All categories for one IP address.
    #[tracing::instrument(skip(self))]
    pub async fn summary_ip(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["summary", "ip"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn summary_domain(&self, domain: &str) -> Result<Option<Value>> {
        self.lookup(&["summary", "domain"], "domain", domain).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn summary_hostname(&self, hostname: &str) -> Result<Option<Value>> {
        self.lookup(&["summary", "hostname"], "hostname", hostname)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_geoloc(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "geoloc"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_inetnum(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "inetnum"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_pastries(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "pastries"], "IP address", ip).await
    }

    /// Forward and reverse resolutions of an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn simple_resolver(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "resolver"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_resolver_forward(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "resolver", "forward"], "IP address", ip)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_resolver_reverse(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "resolver", "reverse"], "IP address", ip)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_sniffer(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "sniffer"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_synscan(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "synscan"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_threatlist(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "threatlist"], "IP address", ip).await
    }

    /// Rankings of the IP address in top-site lists.
    #[tracing::instrument(skip(self))]
    pub async fn simple_topsite(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "topsite"], "IP address", ip).await
    }

    /// Known vulnerabilities detected on an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn simple_vulnscan(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "vulnscan"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_onionscan(&self, onion: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "onionscan"], "onion address", onion)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_ctl(&self, domain: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "ctl"], "domain", domain).await
    }

    /// Scan data for an IP address or a percent-encoded string.
    #[tracing::instrument(skip(self))]
    pub async fn simple_datascan(&self, data: &str) -> Result<Option<Value>> {
        let data = encode_free_text("IP address or string", data)?;
        self.pipeline
            .execute(&["simple", "datascan", &data], None)
            .await
    }

    /// Scan data whose content hashes to the given MD5.
    #[tracing::instrument(skip(self))]
    pub async fn simple_datascan_datamd5(&self, hash: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "datascan", "datamd5"], "MD5 hash", hash)
            .await
    }

    /// Screenshots taken while scanning an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn simple_datashot(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "datashot"], "IP address", ip).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn simple_onionshot(&self, onion: &str) -> Result<Option<Value>> {
        self.lookup(&["simple", "onionshot"], "onion address", onion)
            .await
    }

    /// Unified full-text search. The category is part of the query, e.g.
    /// `category:datascan product:Nginx`.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        let segments = search_segments(&[], query)?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        self.pipeline.execute(&segments, page).await
    }
}
