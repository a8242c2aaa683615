//! Pipeline types: the canonical record and the per-cycle outcome

use crate::pipeline::transform::TransformError;
use crate::source::ExtractError;
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single normalized price observation, the unit of business data.
///
/// Created by the transform stage, handed once to the store, persisted as
/// an immutable append-only row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Observed price; always positive.
    pub amount: Decimal,
    /// Traded asset symbol (e.g. "BTC").
    pub base_asset: String,
    /// Denominating currency symbol (e.g. "USD").
    pub quote_currency: String,
    /// Local observation time, assigned at transform time from the
    /// injected clock rather than taken from upstream data.
    pub observed_at: DateTime<Utc>,
}

/// Pipeline stage names, used as log fields and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Load,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extract => "extract",
            Stage::Transform => "transform",
            Stage::Load => "load",
        }
    }
}

/// Failure of one pipeline stage. The variant is the stage tag: a cycle
/// fails in exactly one place, and the remaining stages never run.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("extract stage failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("transform stage failed: {0}")]
    Transform(#[from] TransformError),
    #[error("load stage failed: {0}")]
    Load(#[from] StoreError),
}

impl CycleError {
    /// Stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            CycleError::Extract(_) => Stage::Extract,
            CycleError::Transform(_) => Stage::Transform,
            CycleError::Load(_) => Stage::Load,
        }
    }
}

/// Result of one pipeline cycle. Ephemeral: observed and logged by the
/// scheduler, never stored.
#[derive(Debug)]
pub enum CycleOutcome {
    /// All three stages completed; the quote is durable.
    Success(PriceQuote),
    /// A stage failed and the cycle was abandoned there.
    Failure(CycleError),
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Success(_))
    }

    /// Stage the cycle failed in, if it failed.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            CycleOutcome::Success(_) => None,
            CycleOutcome::Failure(err) => Some(err.stage()),
        }
    }
}
