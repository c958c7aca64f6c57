//! Fetching tabular sources.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ChartError, ChartResult};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Source of tabular text, keyed by URL.
///
/// Loaders are generic over this trait so that tests and embedders can
/// supply text without a network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the resource body as text.
    async fn fetch(&self, url: &str) -> ChartResult<String>;
}

/// Production fetcher using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with the default request timeout.
    pub fn new() -> ChartResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                ChartError::InvalidConfiguration(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> ChartResult<String> {
        let network_error = |e: reqwest::Error| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "failed to connect".to_string()
            } else {
                e.to_string()
            };
            ChartError::Network {
                url: url.to_string(),
                message,
            }
        };

        let response = self.client.get(url).send().await.map_err(network_error)?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "fetch rejected");
            return Err(ChartError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(network_error)
    }
}
