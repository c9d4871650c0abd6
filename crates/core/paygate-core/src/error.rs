//! Uniform error type shared by every gateway adaptor.
//!
//! Whatever a vendor reports, callers only ever see a [`GatewayError`]. Remote
//! failures keep the untouched vendor error in [`GatewayError::Remote::original`]
//! for callers that need vendor-specific detail.

use serde_json::Value;
use thiserror::Error;

/// Message used when a vendor failure carries no message of its own.
pub const REMOTE_ERROR_FALLBACK: &str = "Remote error";

/// Main error type for gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// A required precondition was not met before any remote call was made
    #[error("Precondition failed: {message}")]
    Precondition {
        /// What was missing or invalid
        message: String,
    },

    /// The remote service rejected or failed the call
    #[error("{message}")]
    Remote {
        /// Vendor message, or [`REMOTE_ERROR_FALLBACK`]
        message: String,
        /// Raw vendor error
        original: Value,
    },

    /// The gateway does not implement this operation
    #[error("Operation not supported by this gateway: {operation}")]
    NotSupported {
        /// Name of the uniform operation
        operation: String,
    },

    /// Configuration could not be loaded or applied
    #[error("Configuration error: {message}")]
    Configuration {
        /// Underlying cause
        message: String,
    },

    /// A domain record could not be turned into a request payload
    #[error("Serialization error: {message}")]
    Serialization {
        /// Underlying cause
        message: String,
    },
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Create a precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create a remote error, falling back to [`REMOTE_ERROR_FALLBACK`] when
    /// the vendor supplied no message.
    pub fn remote(message: Option<String>, original: Value) -> Self {
        Self::Remote {
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| REMOTE_ERROR_FALLBACK.to_string()),
            original,
        }
    }

    /// Create a not-supported error
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported {
            operation: operation.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Human-readable message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Precondition { message }
            | GatewayError::Remote { message, .. }
            | GatewayError::Configuration { message }
            | GatewayError::Serialization { message } => message,
            GatewayError::NotSupported { operation } => operation,
        }
    }

    /// The raw vendor error, for remote failures
    pub fn original(&self) -> Option<&Value> {
        match self {
            GatewayError::Remote { original, .. } => Some(original),
            _ => None,
        }
    }

    /// Whether the failure came from the remote service
    pub fn is_remote(&self) -> bool {
        matches!(self, GatewayError::Remote { .. })
    }

    /// Get error code for external systems
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Precondition { .. } => "PRECONDITION_FAILED",
            GatewayError::Remote { .. } => "REMOTE_ERROR",
            GatewayError::NotSupported { .. } => "NOT_SUPPORTED",
            GatewayError::Configuration { .. } => "CONFIGURATION_ERROR",
            GatewayError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for GatewayError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
