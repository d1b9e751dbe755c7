//! Backend Dispatch Client
//!
//! Forwards resolved key operations to the owning cache node over HTTP.
//! Failed calls are surfaced to the caller as-is; the router never retries
//! or falls back to another node.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Relayed response from a cache node.
#[derive(Debug)]
pub struct Upstream {
    /// HTTP status returned by the node
    pub status: u16,
    /// Raw response body, relayed verbatim
    pub body: String,
}

/// HTTP client for cache node dispatch
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
}

impl BackendClient {
    /// Create a client with the given per-request timeout
    pub fn new(timeout: Duration) -> Self {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Forward a read to the owning node
    pub async fn get(&self, base_url: &str, key: &str) -> Result<Upstream, reqwest::Error> {
        let url = format!("{base_url}/keys/{key}");
        let resp = self.client.get(&url).send().await?;
        Ok(Upstream {
            status: resp.status().as_u16(),
            body: resp.text().await?,
        })
    }

    /// Forward a write to the owning node
    pub async fn put(
        &self,
        base_url: &str,
        key: &str,
        value: &str,
    ) -> Result<Upstream, reqwest::Error> {
        let url = format!("{base_url}/keys/{key}/{value}");
        let resp = self.client.put(&url).send().await?;
        Ok(Upstream {
            status: resp.status().as_u16(),
            body: resp.text().await?,
        })
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
