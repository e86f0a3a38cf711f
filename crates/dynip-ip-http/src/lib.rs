// # HTTP IP Source
//
// This crate provides an HTTP echo-service IP source for the dynip updater.
//
// ## Architecture
//
// Issues a single GET to an echo service (default: api.ipify.org) that
// answers with the caller's address as a plain-text body. The body is
// trimmed and run through the strict IPv4 validator before it is returned.
//
// No caching, no polling, no retry: one call per `current()`.

use dynip_core::traits::IpSource;
use dynip_core::{Error, Result};

use std::net::Ipv4Addr;

/// Default echo service, returns the caller's IPv4 address as plain text
pub const DEFAULT_ECHO_URL: &str = "https://api.ipify.org";

/// HTTP-based IP source
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: Echo service URL (e.g., "https://api.ipify.org")
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Echo service URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw response body from the echo service
    async fn fetch_body(&self) -> Result<String> {
        tracing::debug!("Requesting public IP from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(Error::network(format!(
                "{} answered with HTTP {}",
                self.url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response from {}: {}", self.url, e)))
    }
}

impl Default for HttpIpSource {
    fn default() -> Self {
        Self::new(DEFAULT_ECHO_URL)
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        let body = self.fetch_body().await?;
        let ip = dynip_core::ipv4::validate(&body)?;
        tracing::debug!("Echo service returned {:?}, validated as {}", body.trim(), ip);
        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
