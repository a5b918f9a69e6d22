//! HTTP transport collaborator
//!
//! The detector never talks to the network directly; it goes through the
//! [`HttpClient`] trait so detection logic stays testable without a live
//! site. [`ReqwestClient`] is the bundled implementation.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// User agent for requests (standard Firefox on Windows)
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:66.0) Gecko/20100101 Firefox/66.0";

/// Request timeout in seconds
const TIMEOUT_SECS: u64 = 30;

/// A fetched HTTP response
///
/// The detector reads bodies regardless of status: hosted-platform errors
/// arrive as 404s whose JSON body carries the real error.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

/// HTTP client abstraction for fetching pages and API indexes
///
/// Implementations must be Send + Sync for use across async boundaries.
/// A transport failure (connection, DNS, timeout) is [`Error::Network`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request to the specified URL
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// [`HttpClient`] backed by reqwest
///
/// TLS verification is disabled on purpose: the detector probes arbitrary
/// user-supplied sites, many with broken or self-signed certificates, and
/// fetches no sensitive data.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a client with the fixed user agent and per-request timeout
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
