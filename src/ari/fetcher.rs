use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::types::Result;

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Full response body
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP GET interface
///
/// Implementations return `Error::Transport` only when no response could be
/// obtained. A non-2xx status is still a response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url`, optionally bounded by `timeout`
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse>;
}
