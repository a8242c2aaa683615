//! spot-etl: scheduled Bitcoin spot price acquisition daemon
//!
//! This library provides the core components for:
//! - Fetching the current spot quote from Coinbase's public API
//! - Normalizing raw payloads into canonical price records
//! - Appending records to PostgreSQL, one transaction per record
//! - A fixed-interval scheduling loop with per-cycle error containment
//! - Cooperative shutdown on ctrl-c and SIGTERM
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod scheduler;
pub mod shutdown;
pub mod source;
pub mod store;
pub mod telemetry;
