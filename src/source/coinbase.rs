//! Coinbase spot price client
//!
//! Fetches the current BTC spot quote from Coinbase's public v2 API. The
//! endpoint needs no authentication and returns a small JSON envelope with
//! the amount as text.

use super::{ExtractError, QuoteSource, RawQuote};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Coinbase spot price endpoint
pub const COINBASE_SPOT_URL: &str = "https://api.coinbase.com/v2/prices/spot";

/// Configuration for the quote source client
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Quote endpoint URL
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: COINBASE_SPOT_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Coinbase spot price API
pub struct CoinbaseSource {
    config: SourceConfig,
    client: Client,
}

impl CoinbaseSource {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(SourceConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: SourceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for CoinbaseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for CoinbaseSource {
    /// Perform one GET against the spot endpoint.
    ///
    /// Success requires a 2xx status and a JSON-parseable body; the body's
    /// fields are validated downstream, not here. No internal retries.
    async fn fetch(&self) -> Result<RawQuote, ExtractError> {
        tracing::debug!(url = %self.config.endpoint, "Fetching spot quote");

        let response = self.client.get(&self.config.endpoint).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Status { status, body });
        }

        let payload = response
            .json::<serde_json::Value>()
            .await
            .map_err(ExtractError::MalformedBody)?;

        Ok(RawQuote::new(payload))
    }
}
