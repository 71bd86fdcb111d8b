//! Endpoints of the v1 API.
//!
//! Each lookup maps to `v1/<category>/<identifier>`; searches map to
//! `v1/search/<category>/<percent-encoded query>`.
//!
//! ```no_run
//! # async fn run() -> onyphe_client::Result<()> {
//! let client = onyphe_client::v1::Client::new("my-api-key")?;
//! if let Some(info) = client.ip("8.8.8.8").await? {
//!     println!("{}", info);
//! }
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::fmt;

use crate::config::ClientBuilder;
use crate::error::Result;
use crate::path::{check_identifier, encode_free_text, search_segments};
use crate::pipeline::Pipeline;

/// Categories accepted by the v1 full-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCategory {
    Datascan,
    Synscan,
    Inetnum,
    Threatlist,
    Pastries,
    Resolver,
    Sniffer,
    Ctl,
    Onionscan,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 9] = [
        SearchCategory::Datascan,
        SearchCategory::Synscan,
        SearchCategory::Inetnum,
        SearchCategory::Threatlist,
        SearchCategory::Pastries,
        SearchCategory::Resolver,
        SearchCategory::Sniffer,
        SearchCategory::Ctl,
        SearchCategory::Onionscan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchCategory::Datascan => "datascan",
            SearchCategory::Synscan => "synscan",
            SearchCategory::Inetnum => "inetnum",
            SearchCategory::Threatlist => "threatlist",
            SearchCategory::Pastries => "pastries",
            SearchCategory::Resolver => "resolver",
            SearchCategory::Sniffer => "sniffer",
            SearchCategory::Ctl => "ctl",
            SearchCategory::Onionscan => "onionscan",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for the v1 API.
#[derive(Debug, Clone)]
pub struct Client {
    pipeline: Pipeline,
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build_v1()
    }

    /// See [`ClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build_v1()
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
        log::debug!("Closing v1 client for {}", self.pipeline.base_url());
    }

    async fn lookup(&self, category: &str, kind: &str, value: &str) -> Result<Option<Value>> {
        let value = check_identifier(kind, value)?;
        self.pipeline.execute(&[category, value], None).await
    }

    /// Everything known about an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn ip(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("ip", "IP address", ip).await
    }

    /// Geolocation of an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn geoloc(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("geoloc", "IP address", ip).await
    }

    /// Network block (inetnum) records for an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn inetnum(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("inetnum", "IP address", ip).await
    }

    /// Mentions of an IP address in pastebin-style leaks.
    #[tracing::instrument(skip(self))]
    pub async fn pastries(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("pastries", "IP address", ip).await
    }

    /// Open ports found by SYN scans.
    #[tracing::instrument(skip(self))]
    pub async fn synscan(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("synscan", "IP address", ip).await
    }

    /// Threat lists the IP address appears on.
    #[tracing::instrument(skip(self))]
    pub async fn threatlist(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("threatlist", "IP address", ip).await
    }

    /// Forward DNS resolutions pointing at an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn forward(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("forward", "IP address", ip).await
    }

    /// Reverse DNS names of an IP address.
    #[tracing::instrument(skip(self))]
    pub async fn reverse(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("reverse", "IP address", ip).await
    }

    /// Application-level scan data for an IP address or a plain string.
    /// Strings are percent-encoded, so banners and product names work.
    #[tracing::instrument(skip(self))]
    pub async fn datascan(&self, data: &str) -> Result<Option<Value>> {
        let data = encode_free_text("IP address or string", data)?;
        self.pipeline.execute(&["datascan", &data], None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn sniffer(&self, ip: &str) -> Result<Option<Value>> {
        self.lookup("sniffer", "IP address", ip).await
    }

    /// Certificate transparency log entries for a domain.
    #[tracing::instrument(skip(self))]
    pub async fn ctl(&self, domain: &str) -> Result<Option<Value>> {
        self.lookup("ctl", "domain", domain).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn onionscan(&self, onion: &str) -> Result<Option<Value>> {
        self.lookup("onionscan", "onion address", onion).await
    }

    /// Scan data whose content hashes to the given MD5.
    #[tracing::instrument(skip(self))]
    pub async fn md5(&self, hash: &str) -> Result<Option<Value>> {
        self.lookup("md5", "MD5 hash", hash).await
    }

    /// The caller's public IP address as seen by the service.
    #[tracing::instrument(skip(self))]
    pub async fn myip(&self) -> Result<Option<Value>> {
        self.pipeline.execute(&["myip"], None).await
    }

    /// Account details and remaining credits.
    #[tracing::instrument(skip(self))]
    pub async fn user(&self) -> Result<Option<Value>> {
        self.pipeline.execute(&["user"], None).await
    }

    /// Full-text search in one category. `query` uses the `field:value` syntax
    /// and is percent-encoded here.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        category: SearchCategory,
        query: &str,
        page: Option<u32>,
    ) -> Result<Option<Value>> {
        let segments = search_segments(&[category.as_str()], query)?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        self.pipeline.execute(&segments, page).await
    }

    pub async fn search_datascan(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        self.search(SearchCategory::Datascan, query, page).await
    }

    pub async fn search_synscan(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        self.search(SearchCategory::Synscan, query, page).await
    }

    pub async fn search_inetnum(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        self.search(SearchCategory::Inetnum, query, page).await
    }

    pub async fn search_threatlist(
        &self,
        query: &str,
        page: Option<u32>,
    ) -> Result<Option<Value>> {
        self.search(SearchCategory::Threatlist, query, page).await
    }

    pub async fn search_pastries(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        self.search(SearchCategory::Pastries, query, page).await
    }

    pub async fn search_resolver(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        self.search(SearchCategory::Resolver, query, page).await
    }

    pub async fn search_sniffer(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        self.search(SearchCategory::Sniffer, query, page).await
    }

    pub async fn search_ctl(&self, query: &str, page: Option<u32>) -> Result<Option<Value>> {
        self.search(SearchCategory::Ctl, query, page).await
    }

    pub async fn search_onionscan(
        &self,
        query: &str,
        page: Option<u32>,
    ) -> Result<Option<Value>> {
        self.search(SearchCategory::Onionscan, query, page).await
    }
}
