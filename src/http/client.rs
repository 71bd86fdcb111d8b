//! reqwest-backed transport for the request pipeline.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};
use std::error::Error as StdError;

use crate::error::{OnypheError, Result};

/// Status and raw body of an answered request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a GET and hands back whatever the server answered.
///
/// Implementations only fail with [`OnypheError::ConnectionFailed`]; status
/// codes are left for the caller to classify.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url, query: Vec<(&'static str, String)>) -> Result<RawResponse>;
}

/// Transport over a pooled reqwest session.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpClient {
    // The query carries the API key, keep it out of spans.
    #[tracing::instrument(skip(self, query))]
    async fn get(&self, url: Url, query: Vec<(&'static str, String)>) -> Result<RawResponse> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(connection_error)?;

        debug!("Received HTTP {} ({} bytes)", status.as_u16(), body.len());

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

/// Turns a reqwest failure into `ConnectionFailed` without leaking the request URL.
fn connection_error(error: reqwest::Error) -> OnypheError {
    let kind = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection could not be established"
    } else {
        "transport error"
    };

    let error = error.without_url();
    let mut detail = format!("{}: {}", kind, error);
    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }

    OnypheError::connection_failed(detail)
}
