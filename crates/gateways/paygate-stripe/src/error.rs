//! Errors reported by the Stripe client.
//!
//! Stripe answers failures with an `{"error": {...}}` envelope. The envelope's
//! inner object is kept verbatim as the raw error callers receive.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// `error` object of a Stripe error response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable code, e.g. `card_declined`
    pub code: Option<String>,
    /// Error category, e.g. `card_error` or `invalid_request_error`
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Human-readable message, safe to show to the customer for card errors
    pub message: Option<String>,
    /// Request parameter the error relates to
    pub param: Option<String>,
    /// Issuer decline reason for declined cards
    pub decline_code: Option<String>,
    /// Charge the error relates to
    pub charge: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Value,
}

/// Failure reported by the Stripe client
///
/// This never leaves the crate's public gateway API: the adaptor turns it
/// into a [`paygate_core::GatewayError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StripeError {
    /// Stripe answered with a non-success status
    #[error("Stripe API error (HTTP {status}): {}", .details.message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed error object, empty when the body was not an envelope
        details: ErrorDetails,
        /// Error object as received, or the whole body as a string
        raw: Value,
    },

    /// The request body could not be form-encoded
    #[error("Failed to encode request: {message}")]
    Encode {
        /// Encoder message
        message: String,
    },

    /// The request never produced a response
    #[error("Network error: {message}")]
    Transport {
        /// HTTP client message
        message: String,
    },

    /// A success response could not be decoded
    #[error("Failed to parse response: {message}")]
    Decode {
        /// JSON decoder message
        message: String,
        /// Response body as received
        body: String,
    },
}

impl StripeError {
    /// Build an API error from a non-success response body.
    ///
    /// Bodies that are not Stripe error envelopes are kept verbatim as a JSON
    /// string and carry no message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let raw = serde_json::from_str::<ErrorResponse>(body)
            .map(|response| response.error)
            .unwrap_or_else(|_| Value::String(body.to_string()));
        let details = serde_json::from_value(raw.clone()).unwrap_or_default();

        Self::Api {
            status,
            details,
            raw,
        }
    }

    /// Vendor-facing message, if the failure carried one
    pub fn message(&self) -> Option<String> {
        match self {
            StripeError::Api { details, .. } => details.message.clone(),
            StripeError::Encode { message }
            | StripeError::Transport { message }
            | StripeError::Decode { message, .. } => Some(message.clone()),
        }
    }

    /// The raw error, as handed back to callers under `_original`
    pub fn raw(&self) -> Value {
        match self {
            StripeError::Api { raw, .. } => raw.clone(),
            StripeError::Encode { message } => json!({
                "type": "encode_error",
                "message": message,
            }),
            StripeError::Transport { message } => json!({
                "type": "transport_error",
                "message": message,
            }),
            StripeError::Decode { message, body } => json!({
                "type": "decode_error",
                "message": message,
                "body": body,
            }),
        }
    }

    /// HTTP status of the failed call, when there was a response
    pub fn status(&self) -> Option<u16> {
        match self {
            StripeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_qs::Error> for StripeError {
    fn from(err: serde_qs::Error) -> Self {
        Self::Encode {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for StripeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}
