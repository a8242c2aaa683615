//! Quote persistence module
//!
//! Appends canonical records to PostgreSQL, one transaction per record

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgQuoteStore, StoreConfig};

use crate::pipeline::PriceQuote;
use async_trait::async_trait;
use thiserror::Error;

/// Persistence failure, tagged by the operation that failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to the store: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to provision the schema: {0}")]
    Provision(#[source] sqlx::Error),
    #[error("failed to persist the quote: {0}")]
    Insert(#[source] sqlx::Error),
    #[error("store is unavailable")]
    Unavailable,
}

/// Trait for quote store implementations
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Persist one quote inside its own unit of work
    async fn persist(&self, quote: &PriceQuote) -> Result<(), StoreError>;
}
