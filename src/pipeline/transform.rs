//! Transform stage: raw source payload to canonical record

use crate::pipeline::types::PriceQuote;
use crate::source::RawQuote;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// Data-quality failure: the upstream payload does not match the expected
/// shape or carries an invalid value. Names the offending field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    #[error("payload is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("payload field `{0}` has the wrong type")]
    MistypedField(&'static str),
    #[error("amount `{0}` is not a decimal number")]
    UnparsableAmount(String),
    #[error("amount {0} is not positive")]
    NonPositiveAmount(Decimal),
}

/// Normalize one raw payload into a [`PriceQuote`].
///
/// Pure: the observation instant is an argument, so a fixed payload and
/// instant always produce the same record. Missing or mistyped fields are
/// rejected here, never defaulted; the amount must parse as a positive
/// decimal.
pub fn normalize(raw: &RawQuote, observed_at: DateTime<Utc>) -> Result<PriceQuote, TransformError> {
    let data = match raw.payload.get("data") {
        None => return Err(TransformError::MissingField("data")),
        Some(value) if !value.is_object() => return Err(TransformError::MistypedField("data")),
        Some(value) => value,
    };

    let amount_text = string_field(data, "amount")?;
    let amount = Decimal::from_str(amount_text)
        .map_err(|_| TransformError::UnparsableAmount(amount_text.to_owned()))?;
    if amount <= Decimal::ZERO {
        return Err(TransformError::NonPositiveAmount(amount));
    }

    Ok(PriceQuote {
        amount,
        base_asset: string_field(data, "base")?.to_owned(),
        quote_currency: string_field(data, "currency")?.to_owned(),
        observed_at,
    })
}

fn string_field<'a>(data: &'a Value, name: &'static str) -> Result<&'a str, TransformError> {
    match data.get(name) {
        None => Err(TransformError::MissingField(name)),
        Some(value) => value.as_str().ok_or(TransformError::MistypedField(name)),
    }
}
