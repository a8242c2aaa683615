//! Fixed-interval scheduling loop
//!
//! Drives one pipeline cycle at a time: run the cycle, observe the
//! outcome, wait the configured interval, repeat. Cycle failures never
//! stop the loop; only the shutdown signal does.

use crate::config::SchedulerConfig;
use crate::pipeline::{Clock, CycleOutcome, Pipeline};
use crate::shutdown::Shutdown;
use crate::source::QuoteSource;
use crate::store::QuoteStore;
use crate::telemetry::{self, OutcomeClass};
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Scheduler owning the pipeline and the cadence
pub struct Scheduler<S, D, C>
where
    S: QuoteSource + 'static,
    D: QuoteStore + 'static,
    C: Clock + 'static,
{
    pipeline: Arc<Pipeline<S, D, C>>,
    poll_interval: Duration,
}

impl<S, D, C> Scheduler<S, D, C>
where
    S: QuoteSource + 'static,
    D: QuoteStore + 'static,
    C: Clock + 'static,
{
    /// Create a scheduler around a pipeline
    pub fn new(pipeline: Pipeline<S, D, C>, config: SchedulerConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            poll_interval: config.poll_interval,
        }
    }

    /// Run cycles until the shutdown signal fires.
    ///
    /// Each cycle is spawned as its own task so a panic surfaces as a
    /// `JoinError` here instead of tearing the loop down; it is logged and
    /// counted as a failed cycle. The wait is relative to cycle
    /// completion, and both the in-flight cycle and the wait race against
    /// shutdown. Cycles never overlap.
    pub async fn run(self, mut shutdown: Shutdown) {
        tracing::info!(
            interval_secs = self.poll_interval.as_secs_f64(),
            "Scheduler running"
        );

        loop {
            if shutdown.is_triggered() {
                break;
            }

            let pipeline = Arc::clone(&self.pipeline);
            let started = Instant::now();
            let mut cycle = tokio::spawn(async move { pipeline.run_cycle().await });

            tokio::select! {
                joined = &mut cycle => {
                    let elapsed = started.elapsed();
                    telemetry::record_cycle_duration(elapsed);
                    match joined {
                        Ok(outcome) => observe_outcome(&outcome, elapsed),
                        Err(err) => {
                            telemetry::record_cycle(OutcomeClass::UnexpectedError);
                            tracing::error!(error = %err, "Cycle aborted by an unexpected fault");
                        }
                    }
                }
                _ = shutdown.wait() => {
                    // Best-effort cancel of the in-flight cycle
                    cycle.abort();
                    tracing::debug!("In-flight cycle cancelled");
                    break;
                }
            }

            tokio::select! {
                _ = sleep(self.poll_interval) => {}
                _ = shutdown.wait() => break,
            }
        }

        tracing::info!("Scheduler stopped");
    }
}

/// One log line and one counter increment per cycle outcome
fn observe_outcome(outcome: &CycleOutcome, elapsed: Duration) {
    telemetry::record_cycle(OutcomeClass::from(outcome));

    match outcome {
        CycleOutcome::Success(quote) => {
            if let Some(amount) = quote.amount.to_f64() {
                telemetry::set_last_amount(amount);
            }
            tracing::info!(
                amount = %quote.amount,
                base = %quote.base_asset,
                currency = %quote.quote_currency,
                elapsed_ms = elapsed.as_millis() as u64,
                "Cycle succeeded"
            );
        }
        CycleOutcome::Failure(err) => {
            tracing::warn!(
                stage = err.stage().as_str(),
                error = %err,
                elapsed_ms = elapsed.as_millis() as u64,
                "Cycle failed"
            );
        }
    }
}
