use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::ari::fetcher::{HttpFetcher, HttpResponse};
use crate::error::Error;
use crate::types::Result;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("ari-probe/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed HTTP client
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    /// HTTP client
    client: Client,
}

impl ReqwestFetcher {
    /// Create a new client with reqwest's default settings
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(url, e))?;

        debug!(url, status, len = body.len(), "HTTP GET completed");
        Ok(HttpResponse { status, body })
    }
}
