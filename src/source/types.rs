//! Quote source types

use reqwest::StatusCode;
use thiserror::Error;

/// Unparsed quote payload as returned by the source.
///
/// The body is parsed only as JSON here; field presence, types, and value
/// validity are the transform stage's concern. Lives for one cycle and is
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuote {
    /// Full response body.
    pub payload: serde_json::Value,
}

impl RawQuote {
    /// Wrap an already-parsed payload.
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }
}

/// Extraction failures: everything that can go wrong before a well-formed
/// payload is in hand. Always reported to the caller as a value, never a
/// process-level fault.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Transport-level failure: connect, DNS, TLS, or timeout.
    #[error("request to quote source failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The source answered with a non-success status.
    #[error("quote source returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The response body was not valid JSON.
    #[error("quote source returned a malformed body: {0}")]
    MalformedBody(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_quote_carries_payload() {
        let raw = RawQuote::new(json!({"data": {"amount": "100.0"}}));
        assert_eq!(raw.payload["data"]["amount"], "100.0");
    }

    #[test]
    fn status_error_names_status_and_body() {
        let err = ExtractError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "upstream maintenance".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("upstream maintenance"));
    }
}
