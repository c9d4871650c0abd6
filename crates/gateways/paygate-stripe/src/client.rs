//! HTTP client for the Stripe resources the adaptor uses.

use std::fmt;

use async_trait::async_trait;
use paygate_core::{merge, GatewayConfig, GatewayError, GatewayResult, Payload};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::error::StripeError;
use crate::form;

/// Production API host
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

const USER_AGENT: &str = concat!("paygate-stripe/", env!("CARGO_PKG_VERSION"));

/// Remote calls the adaptor delegates to
#[async_trait]
pub trait StripeApi: Send + Sync {
    /// Create a charge (`charges.create`)
    async fn create_charge(&self, payload: Payload) -> Result<Value, StripeError>;

    /// Refund a charge (`charges.createRefund`)
    async fn create_refund(&self, charge_id: &str, options: Payload) -> Result<Value, StripeError>;

    /// Create a customer (`customers.create`)
    async fn create_customer(&self, payload: Payload) -> Result<Value, StripeError>;
}

/// Client options beyond the secret key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeOptions {
    /// API host, without the `/v1` suffix
    pub api_base: String,
    /// Sent as `Stripe-Version` when set
    pub api_version: Option<String>,
    /// Sent as `Stripe-Account` when set
    pub account: Option<String>,
}

impl Default for StripeOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: None,
            account: None,
        }
    }
}

impl StripeOptions {
    /// Point the client at another host, e.g. a local mock server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Pin requests to an API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Act on behalf of a connected account
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

impl From<&GatewayConfig> for StripeOptions {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_version: config.api_version.clone(),
            account: config.account.clone(),
        }
    }
}

/// Stripe REST client
///
/// Every POST carries a fresh `Idempotency-Key`. No request timeout is set.
pub struct StripeClient {
    http: reqwest::Client,
    api_key: Zeroizing<String>,
    options: StripeOptions,
}

impl StripeClient {
    /// Create a client authenticating with `api_key`
    pub fn new(api_key: impl Into<Zeroizing<String>>, options: StripeOptions) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            options,
        })
    }

    /// Options the client was built with
    pub fn options(&self) -> &StripeOptions {
        &self.options
    }

    /// The `charges` resource group
    pub fn charges(&self) -> Charges<'_> {
        Charges { client: self }
    }

    /// The `customers` resource group
    pub fn customers(&self) -> Customers<'_> {
        Customers { client: self }
    }

    async fn post(&self, path: &str, payload: &Payload) -> Result<Value, StripeError> {
        let url = format!("{}/v1/{}", self.options.api_base.trim_end_matches('/'), path);
        let body = form::encode(payload)?;

        let mut request = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.as_str())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .body(body);

        if let Some(version) = &self.options.api_version {
            request = request.header("Stripe-Version", version);
        }
        if let Some(account) = &self.options.account {
            request = request.header("Stripe-Account", account);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(method = "POST", path, status = status.as_u16(), "Stripe request completed");

        if !status.is_success() {
            return Err(StripeError::from_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| StripeError::Decode {
            message: e.to_string(),
            body,
        })
    }
}

impl fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_key", &"***")
            .field("options", &self.options)
            .finish()
    }
}

/// Charge endpoints
#[derive(Debug, Clone, Copy)]
pub struct Charges<'a> {
    client: &'a StripeClient,
}

impl Charges<'_> {
    /// `POST /v1/charges`
    pub async fn create(&self, payload: &Payload) -> Result<Value, StripeError> {
        self.client.post("charges", payload).await
    }

    /// `POST /v1/refunds` for `charge_id`
    pub async fn create_refund(&self, charge_id: &str, options: &Payload) -> Result<Value, StripeError> {
        let mut body = Payload::new();
        body.insert("charge".to_string(), Value::String(charge_id.to_string()));
        let body = merge(body, options.clone());
        self.client.post("refunds", &body).await
    }
}

/// Customer endpoints
#[derive(Debug, Clone, Copy)]
pub struct Customers<'a> {
    client: &'a StripeClient,
}

impl Customers<'_> {
    /// `POST /v1/customers`
    pub async fn create(&self, payload: &Payload) -> Result<Value, StripeError> {
        self.client.post("customers", payload).await
    }
}

#[async_trait]
impl StripeApi for StripeClient {
    async fn create_charge(&self, payload: Payload) -> Result<Value, StripeError> {
        self.charges().create(&payload).await
    }

    async fn create_refund(&self, charge_id: &str, options: Payload) -> Result<Value, StripeError> {
        self.charges().create_refund(charge_id, &options).await
    }

    async fn create_customer(&self, payload: Payload) -> Result<Value, StripeError> {
        self.customers().create(&payload).await
    }
}
