//! Gateway configuration loading.
//!
//! Settings come from an optional TOML or JSON file, then from `PAYGATE_*`
//! environment variables, later sources overriding earlier ones. Nested keys
//! use a double underscore: `PAYGATE_EXTRA__STATEMENT_DESCRIPTOR` sets
//! `extra.statement_descriptor`.

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GatewayResult;

/// Prefix of the environment variables read by [`GatewayConfig::load`]
pub const ENV_PREFIX: &str = "PAYGATE";

/// Settings shared by gateway adaptors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Secret API key; adaptors refuse to start without one
    pub api_secret: Option<String>,
    /// Override of the vendor API base URL
    pub api_base: Option<String>,
    /// Vendor API version to pin requests to
    pub api_version: Option<String>,
    /// Connected account to act on behalf of
    pub account: Option<String>,
    /// Adaptor-specific settings
    pub extra: HashMap<String, String>,
}

impl GatewayConfig {
    /// Load configuration from `path` (if given) and the environment
    pub fn load(path: Option<&Path>) -> GatewayResult<Self> {
        debug!(path = ?path, prefix = ENV_PREFIX, "Loading gateway configuration");

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Load configuration from the environment only
    pub fn from_env() -> GatewayResult<Self> {
        Self::load(None)
    }

    /// The API secret, if set and non-empty
    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref().filter(|secret| !secret.is_empty())
    }
}
