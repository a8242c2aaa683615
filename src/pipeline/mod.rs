//! Pipeline module
//!
//! Composes extract, transform, and load into one cycle with per-stage
//! error containment

pub mod clock;
mod transform;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use transform::{normalize, TransformError};
pub use types::{CycleError, CycleOutcome, PriceQuote, Stage};

use crate::source::QuoteSource;
use crate::store::QuoteStore;

/// Runs one extract, transform, load cycle at a time.
///
/// Generic over its collaborators so tests can substitute a scripted
/// source, an in-memory store, and a fixed clock.
pub struct Pipeline<S: QuoteSource, D: QuoteStore, C: Clock> {
    source: S,
    store: D,
    clock: C,
}

impl<S: QuoteSource, D: QuoteStore> Pipeline<S, D, SystemClock> {
    /// Create a pipeline observing real wall-clock time
    pub fn new(source: S, store: D) -> Self {
        Self::with_clock(source, store, SystemClock)
    }
}

impl<S: QuoteSource, D: QuoteStore, C: Clock> Pipeline<S, D, C> {
    /// Create a pipeline with an injected clock
    pub fn with_clock(source: S, store: D, clock: C) -> Self {
        Self {
            source,
            store,
            clock,
        }
    }

    /// Run one cycle: extract, transform, load.
    ///
    /// The first failing stage ends the cycle; later stages never run for
    /// that cycle. Every outcome is returned as a value, never an `Err`,
    /// so a failure cannot propagate beyond the cycle boundary.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let raw = match self.source.fetch().await {
            Ok(raw) => raw,
            Err(err) => return CycleOutcome::Failure(err.into()),
        };

        let quote = match normalize(&raw, self.clock.now()) {
            Ok(quote) => quote,
            Err(err) => return CycleOutcome::Failure(err.into()),
        };

        if let Err(err) = self.store.persist(&quote).await {
            return CycleOutcome::Failure(err.into());
        }

        CycleOutcome::Success(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ExtractError, RawQuote};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use reqwest::StatusCode;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StaticSource {
        payload: serde_json::Value,
        calls: Arc<AtomicUsize>,
    }

    impl StaticSource {
        fn new(payload: serde_json::Value) -> Self {
            Self {
                payload,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl QuoteSource for StaticSource {
        async fn fetch(&self) -> Result<RawQuote, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawQuote::new(self.payload.clone()))
        }
    }

    struct UnavailableSource;

    #[async_trait]
    impl QuoteSource for UnavailableSource {
        async fn fetch(&self) -> Result<RawQuote, ExtractError> {
            Err(ExtractError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "upstream down".to_string(),
            })
        }
    }

    fn spot_payload(amount: &str) -> serde_json::Value {
        json!({ "data": { "amount": amount, "base": "BTC", "currency": "USD" } })
    }

    #[tokio::test]
    async fn successful_cycle_persists_the_quote() {
        let store = MemoryStore::new();
        let instant = Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 0).unwrap();
        let pipeline = Pipeline::with_clock(
            StaticSource::new(spot_payload("67890.12")),
            store.clone(),
            FixedClock(instant),
        );

        let outcome = pipeline.run_cycle().await;

        match outcome {
            CycleOutcome::Success(quote) => {
                assert_eq!(quote.amount, dec!(67890.12));
                assert_eq!(quote.observed_at, instant);
            }
            other => panic!("expected success, got {:?}", other),
        }
        let quotes = store.quotes().await;
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].amount, dec!(67890.12));
    }

    #[tokio::test]
    async fn extract_failure_short_circuits() {
        let store = MemoryStore::new();
        let pipeline = Pipeline::new(UnavailableSource, store.clone());

        let outcome = pipeline.run_cycle().await;

        assert_eq!(outcome.failed_stage(), Some(Stage::Extract));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn transform_failure_never_reaches_the_store() {
        let store = MemoryStore::new();
        let pipeline = Pipeline::new(StaticSource::new(spot_payload("-5")), store.clone());

        let outcome = pipeline.run_cycle().await;

        assert_eq!(outcome.failed_stage(), Some(Stage::Transform));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn load_failure_leaves_no_partial_row() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let pipeline = Pipeline::new(StaticSource::new(spot_payload("67890.12")), store.clone());

        let outcome = pipeline.run_cycle().await;

        assert_eq!(outcome.failed_stage(), Some(Stage::Load));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn each_cycle_fetches_once() {
        let source = StaticSource::new(spot_payload("100"));
        let calls = Arc::clone(&source.calls);
        let pipeline = Pipeline::new(source, MemoryStore::new());

        pipeline.run_cycle().await;
        pipeline.run_cycle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
