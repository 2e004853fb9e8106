//! Outbound JSON fetching for the forecast tool.

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::core::config::WeatherConfig;

/// Why a fetch produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("request failed: {0}")]
    Request(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Body(String),
}

/// Fetch a URL and decode its JSON body.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, Unavailable>;
}

/// [`Fetch`] over HTTP with a per-request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Value, Unavailable> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Fetch failed: {}", e);
                Unavailable::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {}", status);
            return Err(Unavailable::Status(status.as_u16()));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| Unavailable::Body(e.to_string()))?;
        debug!("Fetched {} bytes of JSON", body.to_string().len());
        Ok(body)
    }
}
