//! The uniform gateway interface every vendor adaptor implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};
use crate::mapping::Payload;
use crate::model::{CreditCard, Order, Prospect, RefundOptions};

/// Result envelope returned by every successful gateway operation
///
/// Carries the normalized identifier the operation produces, if any, and the
/// untouched vendor response under `_original`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Identifier of the charge that was created
    #[serde(rename = "transactionId", default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Identifier of the customer profile that was created
    #[serde(rename = "profileId", default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    /// Raw vendor response
    #[serde(rename = "_original")]
    pub original: Value,
}

impl GatewayResponse {
    /// Envelope for an operation that created a transaction
    pub fn transaction(original: Value) -> Self {
        Self {
            transaction_id: response_id(&original),
            profile_id: None,
            original,
        }
    }

    /// Envelope for an operation that created a customer profile
    pub fn profile(original: Value) -> Self {
        Self {
            transaction_id: None,
            profile_id: response_id(&original),
            original,
        }
    }

    /// Envelope with no normalized identifier
    pub fn original_only(original: Value) -> Self {
        Self {
            transaction_id: None,
            profile_id: None,
            original,
        }
    }
}

fn response_id(response: &Value) -> Option<String> {
    response.get("id").and_then(Value::as_str).map(str::to_string)
}

/// Uniform payment gateway capability set
///
/// `other` arguments are vendor-specific overrides merged last into the
/// outgoing request, so they win over anything the adaptor derived.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge a card and capture the funds immediately
    async fn submit_transaction(
        &self,
        order: Order,
        credit_card: &CreditCard,
        prospect: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse>;

    /// Authorize a card charge without capturing it
    async fn authorize_transaction(
        &self,
        order: Order,
        credit_card: &CreditCard,
        prospect: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse>;

    /// Refund all or part of a transaction
    async fn refund_transaction(
        &self,
        transaction_id: &str,
        options: Option<RefundOptions>,
    ) -> GatewayResult<GatewayResponse>;

    /// Void a transaction
    async fn void_transaction(
        &self,
        transaction_id: &str,
        options: Option<RefundOptions>,
    ) -> GatewayResult<GatewayResponse>;

    /// Store a card and billing details as a reusable customer profile
    async fn create_customer_profile(
        &self,
        credit_card: &CreditCard,
        billing: &Prospect,
        shipping: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse>;

    /// Charge the stored payment method of `prospect.profile_id`
    async fn charge_customer(
        &self,
        order: Order,
        prospect: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse>;

    /// List settled batches between two dates (optional)
    async fn get_settled_batch_list(
        &self,
        _from: &str,
        _to: &str,
    ) -> GatewayResult<GatewayResponse> {
        Err(GatewayError::not_supported("get_settled_batch_list"))
    }

    /// Create a recurring billing subscription (optional)
    async fn create_subscription(
        &self,
        _credit_card: &CreditCard,
        _prospect: &Prospect,
        _subscription_plan: Payload,
        _other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse> {
        Err(GatewayError::not_supported("create_subscription"))
    }
}
