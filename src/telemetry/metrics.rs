//! Prometheus metrics
//!
//! Thin wrappers over the `metrics` facade. They record unconditionally;
//! without an installed exporter the facade drops them, so callers never
//! branch on whether metrics are enabled.

use crate::pipeline::{CycleOutcome, Stage};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Cycle outcome classes, used as counter label values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    Success,
    ExtractError,
    TransformError,
    LoadError,
    UnexpectedError,
}

impl OutcomeClass {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeClass::Success => "success",
            OutcomeClass::ExtractError => "extract_error",
            OutcomeClass::TransformError => "transform_error",
            OutcomeClass::LoadError => "load_error",
            OutcomeClass::UnexpectedError => "unexpected_error",
        }
    }
}

impl From<&CycleOutcome> for OutcomeClass {
    fn from(outcome: &CycleOutcome) -> Self {
        match outcome.failed_stage() {
            None => OutcomeClass::Success,
            Some(Stage::Extract) => OutcomeClass::ExtractError,
            Some(Stage::Transform) => OutcomeClass::TransformError,
            Some(Stage::Load) => OutcomeClass::LoadError,
        }
    }
}

/// Count one completed cycle by outcome
pub fn record_cycle(class: OutcomeClass) {
    counter!("spot_etl_cycles_total", "outcome" => class.label()).increment(1);
}

/// Record how long a cycle took, start to outcome
pub fn record_cycle_duration(duration: Duration) {
    histogram!("spot_etl_cycle_duration_ms").record(duration.as_secs_f64() * 1000.0);
}

/// Publish the most recently persisted amount
pub fn set_last_amount(amount: f64) {
    gauge!("spot_etl_last_amount").set(amount);
}

/// Install the Prometheus exporter on the given port.
///
/// Serves text-format metrics on `/metrics`, bound on all interfaces.
/// Must run inside the Tokio runtime.
pub fn install_exporter(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener((Ipv4Addr::UNSPECIFIED, port))
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(port, "Prometheus exporter listening");
    Ok(())
}
