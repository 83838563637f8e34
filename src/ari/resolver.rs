use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::ari::fetcher::{HttpFetcher, HttpResponse};
use crate::ari::types::{DiscoveryDirectory, RenewalInfo};
use crate::error::DecodeError;
use crate::types::Result;

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// ACME directory URL
    pub directory_url: String,
    /// Per-request timeout, `None` leaves the HTTP client default
    pub timeout: Option<Duration>,
}

impl ResolverConfig {
    pub fn new(directory_url: impl Into<String>) -> Self {
        Self {
            directory_url: directory_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// ACME Renewal Information resolver
///
/// Discovery must succeed before any renewal-info lookup, since the lookup
/// URL is built from the discovered endpoint. Nothing is cached and no
/// request is retried.
pub struct AriResolver<F: HttpFetcher> {
    /// HTTP collaborator
    fetcher: F,
    /// Resolver configuration
    config: ResolverConfig,
}

impl<F: HttpFetcher> AriResolver<F> {
    /// Create a new resolver
    pub fn new(fetcher: F, config: ResolverConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Discover the renewal-info endpoint from the configured directory
    pub async fn discover_endpoint(&self) -> Result<String> {
        self.discover_endpoint_at(&self.config.directory_url).await
    }

    /// Discover the renewal-info endpoint from the directory at `directory_url`
    pub async fn discover_endpoint_at(&self, directory_url: &str) -> Result<String> {
        let response = self.fetcher.get(directory_url, self.config.timeout).await?;
        let directory: DiscoveryDirectory = decode_json(directory_url, &response)?;

        debug!(
            url = directory_url,
            status = response.status,
            renewal_info = %directory.renewal_info,
            "HTTP ACME Directory GET completed"
        );

        Ok(directory.renewal_info)
    }

    /// Query the renewal window for the certificate named by `identifier`
    pub async fn fetch_renewal_info(
        &self,
        renewal_info_url: &str,
        identifier: &str,
    ) -> Result<RenewalInfo> {
        let url = renewal_info_request_url(renewal_info_url, identifier);
        info!(url = %url, "ARI request");

        let response = self.fetcher.get(&url, self.config.timeout).await?;
        decode_json(&url, &response)
    }
}

/// Request URL for a renewal-info lookup
///
/// Plain concatenation: `identifier` is used as a single path segment
/// without escaping and `renewal_info_url` is not normalised.
pub fn renewal_info_request_url(renewal_info_url: &str, identifier: &str) -> String {
    format!("{}/{}", renewal_info_url, identifier)
}

fn decode_json<T: DeserializeOwned>(url: &str, response: &HttpResponse) -> Result<T> {
    if !response.is_success() {
        warn!(url, status = response.status, "Server returned non-success status");
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        DecodeError::Json {
            url: url.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
