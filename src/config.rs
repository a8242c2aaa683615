//! Configuration types for spot-etl
//!
//! Every value comes from the process environment, optionally seeded from
//! a dotenv file before loading. Empty variables count as unset.

use crate::source::{SourceConfig, COINBASE_SPOT_URL};
use crate::store::StoreConfig;
use crate::telemetry::LogFormat;
use anyhow::Context;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub store: StoreConfig,
    pub scheduler: SchedulerConfig,
    pub telemetry: TelemetryConfig,
}

/// Scheduling configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Wait between cycle completion and the next cycle start
    pub poll_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(15),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    /// Port for the Prometheus exporter; exporter disabled when unset
    pub metrics_port: Option<u16>,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = StoreConfig {
            host: var(&lookup, "POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_var(&lookup, "POSTGRES_PORT", 5432)?,
            user: required(&lookup, "POSTGRES_USER")?,
            password: required(&lookup, "POSTGRES_PASSWORD")?,
            database: required(&lookup, "POSTGRES_DB")?,
        };

        let source = SourceConfig {
            endpoint: var(&lookup, "ETL_QUOTE_URL")
                .unwrap_or_else(|| COINBASE_SPOT_URL.to_string()),
            timeout: Duration::from_secs(parse_var(&lookup, "ETL_HTTP_TIMEOUT_SECS", 10)?),
        };

        let scheduler = SchedulerConfig {
            poll_interval: Duration::from_secs(parse_var(&lookup, "ETL_POLL_INTERVAL_SECS", 15)?),
        };

        let log_format = match var(&lookup, "ETL_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                anyhow::bail!("ETL_LOG_FORMAT must be `pretty` or `json`, got `{}`", other)
            }
        };

        let telemetry = TelemetryConfig {
            log_level: var(&lookup, "ETL_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
            metrics_port: var(&lookup, "ETL_METRICS_PORT")
                .map(|value| {
                    value.parse().with_context(|| {
                        format!("ETL_METRICS_PORT must be a port number, got `{}`", value)
                    })
                })
                .transpose()?,
        };

        Ok(Self {
            source,
            store,
            scheduler,
            telemetry,
        })
    }
}

/// Look up a variable, treating empty or whitespace-only values as unset
fn var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, name: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    var(lookup, name).with_context(|| format!("required environment variable {} is not set", name))
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(lookup, name) {
        Some(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("{} must be a number, got `{}`: {}", name, value, e)),
        None => Ok(default),
    }
}
