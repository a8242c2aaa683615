//! End-to-end wiring: configuration through the scheduler to the store

use async_trait::async_trait;
use rust_decimal_macros::dec;
use serde_json::json;
use spot_etl::config::Config;
use spot_etl::pipeline::Pipeline;
use spot_etl::scheduler::Scheduler;
use spot_etl::shutdown;
use spot_etl::source::{CoinbaseSource, ExtractError, QuoteSource, RawQuote};
use spot_etl::store::MemoryStore;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::timeout;

struct FixedSource;

#[async_trait]
impl QuoteSource for FixedSource {
    async fn fetch(&self) -> Result<RawQuote, ExtractError> {
        Ok(RawQuote::new(json!({
            "data": { "amount": "67890.12", "base": "BTC", "currency": "USD" }
        })))
    }
}

#[test]
fn config_wires_up_the_source_client() {
    let vars: HashMap<String, String> = [
        ("POSTGRES_USER", "etl"),
        ("POSTGRES_PASSWORD", "secret"),
        ("POSTGRES_DB", "quotes"),
        ("ETL_QUOTE_URL", "https://quotes.example.com/spot"),
        ("ETL_HTTP_TIMEOUT_SECS", "3"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

    // Construction only; no request leaves the process here
    let _source = CoinbaseSource::with_config(config.source);
    let _pipeline = Pipeline::new(FixedSource, MemoryStore::new());
}

#[tokio::test]
async fn daemon_loop_appends_a_growing_series() {
    let store = MemoryStore::new();
    let scheduler = Scheduler::new(
        Pipeline::new(FixedSource, store.clone()),
        spot_etl::config::SchedulerConfig {
            poll_interval: Duration::from_millis(10),
        },
    );
    let (trigger, shutdown) = shutdown::channel();

    let run = tokio::spawn(scheduler.run(shutdown));
    tokio::time::sleep(Duration::from_millis(80)).await;
    trigger.trigger();
    timeout(Duration::from_secs(1), run).await.unwrap().unwrap();

    let quotes = store.quotes().await;
    assert!(quotes.len() >= 2, "expected a growing series, got {}", quotes.len());
    for quote in &quotes {
        assert_eq!(quote.amount, dec!(67890.12));
        assert_eq!(quote.base_asset, "BTC");
        assert_eq!(quote.quote_currency, "USD");
    }
    for pair in quotes.windows(2) {
        assert!(pair[0].observed_at <= pair[1].observed_at);
    }
}
