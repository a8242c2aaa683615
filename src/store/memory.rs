//! In-memory quote store

use super::{QuoteStore, StoreError};
use crate::pipeline::PriceQuote;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store that keeps quotes in memory instead of a database.
///
/// Substitutes for the PostgreSQL store in tests and offline runs. A
/// cloned handle shares the same buffer, so a test can hand one handle to
/// the pipeline and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    quotes: Arc<RwLock<Vec<PriceQuote>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Quotes persisted so far, in insertion order
    pub async fn quotes(&self) -> Vec<PriceQuote> {
        self.quotes.read().await.clone()
    }

    /// Number of quotes persisted so far
    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }

    /// Make subsequent persists fail, simulating an unreachable store
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn persist(&self, quote: &PriceQuote) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }

        let mut quotes = self.quotes.write().await;
        quotes.push(quote.clone());
        Ok(())
    }
}
