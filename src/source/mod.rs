//! Quote source module
//!
//! Provides the current BTC spot price from Coinbase's public API

mod coinbase;
mod types;

pub use coinbase::{CoinbaseSource, SourceConfig, COINBASE_SPOT_URL};
pub use types::{ExtractError, RawQuote};

use async_trait::async_trait;

/// Trait for quote source implementations
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the current raw quote payload
    async fn fetch(&self) -> Result<RawQuote, ExtractError>;
}
