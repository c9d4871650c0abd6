use async_trait::async_trait;
use paygate_core::{
    currency_or_default, merge, nest, to_minor_units, to_payload, CreditCard, GatewayConfig,
    GatewayError, GatewayResponse, GatewayResult, Order, PaymentGateway, Payload, Prospect,
    RefundOptions,
};
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use crate::client::{StripeApi, StripeClient, StripeOptions};
use crate::error::StripeError;
use crate::schema::{BILLING_SCHEMA, CARD_SCHEMA, SHIPPING_ADDRESS_SCHEMA};

const MISSING_SECRET: &str = "API_SECRET is mandatory";

/// Stripe implementation of [`PaymentGateway`]
///
/// Wraps a [`StripeApi`] delegate, by default the HTTP [`StripeClient`].
/// Amounts are sent in minor units and every delegate failure is returned as
/// [`GatewayError::Remote`].
pub struct StripeGateway<C = StripeClient> {
    delegate: C,
}

impl StripeGateway<StripeClient> {
    /// Create a gateway against the production API.
    ///
    /// Fails with [`GatewayError::Precondition`] if `api_secret` is empty.
    pub fn new(api_secret: impl Into<String>) -> GatewayResult<Self> {
        Self::with_options(api_secret, StripeOptions::default())
    }

    /// Create a gateway with client options (API base, version, account)
    pub fn with_options(api_secret: impl Into<String>, options: StripeOptions) -> GatewayResult<Self> {
        let api_secret = Zeroizing::new(api_secret.into());
        if api_secret.is_empty() {
            return Err(GatewayError::precondition(MISSING_SECRET));
        }

        let delegate = StripeClient::new(api_secret, options)?;
        Ok(Self { delegate })
    }

    /// Create a gateway from loaded configuration
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        let api_secret = config
            .api_secret()
            .ok_or_else(|| GatewayError::precondition(MISSING_SECRET))?;
        Self::with_options(api_secret, StripeOptions::from(config))
    }
}

impl<C: StripeApi> StripeGateway<C> {
    /// Wrap an existing delegate
    pub fn with_delegate(delegate: C) -> Self {
        Self { delegate }
    }
}

fn parse_error(err: StripeError) -> GatewayError {
    GatewayError::remote(err.message(), err.raw())
}

fn order_payload(order: Order) -> GatewayResult<Payload> {
    let Order {
        amount,
        currency,
        extra,
    } = order;

    let mut payload = extra;
    payload.insert("amount".to_string(), to_minor_units(amount)?.into());
    payload.insert(
        "currency".to_string(),
        currency_or_default(currency.as_deref()).into(),
    );
    Ok(payload)
}

/// `{source: {object: "card", <card fields>, <billing address fields>}}`
fn card_source(credit_card: &CreditCard, billing: &Prospect) -> GatewayResult<Payload> {
    let mut card = Payload::new();
    card.insert("object".to_string(), "card".into());

    let card = merge(card, CARD_SCHEMA.project(&to_payload(credit_card)?));
    let source = merge(card, BILLING_SCHEMA.project(&to_payload(billing)?));
    Ok(nest("source", source))
}

/// `{shipping: {name, phone, address: {...}}}`, or `None` without an address
fn customer_shipping(shipping: &Prospect) -> GatewayResult<Option<Payload>> {
    let address = SHIPPING_ADDRESS_SCHEMA.project(&to_payload(shipping)?);
    if address.is_empty() {
        return Ok(None);
    }

    let mut details = Payload::new();
    if let Some(name) = shipping.shipping_name() {
        details.insert("name".to_string(), name.into());
    }
    if let Some(phone) = shipping.shipping_phone.as_deref() {
        details.insert("phone".to_string(), phone.into());
    }
    details.insert("address".to_string(), Value::Object(address));
    Ok(Some(nest("shipping", details)))
}

#[async_trait]
impl<C: StripeApi> PaymentGateway for StripeGateway<C> {
    async fn submit_transaction(
        &self,
        order: Order,
        credit_card: &CreditCard,
        prospect: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse> {
        let payload = merge(order_payload(order)?, card_source(credit_card, prospect)?);
        let payload = merge(payload, other.unwrap_or_default());

        debug!(operation = "submit_transaction", amount = ?payload.get("amount"), "Creating charge");

        let response = self
            .delegate
            .create_charge(payload)
            .await
            .map_err(parse_error)?;

        let result = GatewayResponse::transaction(response);
        debug!(transaction_id = ?result.transaction_id, "Charge created");
        Ok(result)
    }

    async fn authorize_transaction(
        &self,
        order: Order,
        credit_card: &CreditCard,
        prospect: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse> {
        let mut other = other.unwrap_or_default();
        other.insert("capture".to_string(), Value::Bool(false));
        self.submit_transaction(order, credit_card, prospect, Some(other))
            .await
    }

    async fn refund_transaction(
        &self,
        transaction_id: &str,
        options: Option<RefundOptions>,
    ) -> GatewayResult<GatewayResponse> {
        let RefundOptions { amount, extra } = options.unwrap_or_default();

        let mut payload = extra;
        if let Some(amount) = amount {
            payload.insert("amount".to_string(), to_minor_units(amount)?.into());
        }

        debug!(operation = "refund_transaction", transaction_id, "Creating refund");

        let response = self
            .delegate
            .create_refund(transaction_id, payload)
            .await
            .map_err(parse_error)?;

        Ok(GatewayResponse::original_only(response))
    }

    // Stripe releases an uncaptured authorization when it is refunded.
    async fn void_transaction(
        &self,
        transaction_id: &str,
        options: Option<RefundOptions>,
    ) -> GatewayResult<GatewayResponse> {
        self.refund_transaction(transaction_id, options).await
    }

    async fn create_customer_profile(
        &self,
        credit_card: &CreditCard,
        billing: &Prospect,
        shipping: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse> {
        let mut customer = Payload::new();
        if let Some(email) = billing
            .billing_email_address
            .as_deref()
            .filter(|email| !email.is_empty())
        {
            customer.insert("email".to_string(), email.into());
        }

        let mut customer = merge(customer, card_source(credit_card, billing)?);
        if let Some(shipping) = customer_shipping(shipping)? {
            customer = merge(customer, shipping);
        }
        let customer = merge(customer, other.unwrap_or_default());

        debug!(operation = "create_customer_profile", "Creating customer");

        let response = self
            .delegate
            .create_customer(customer)
            .await
            .map_err(parse_error)?;

        let result = GatewayResponse::profile(response);
        debug!(profile_id = ?result.profile_id, "Customer created");
        Ok(result)
    }

    async fn charge_customer(
        &self,
        order: Order,
        prospect: &Prospect,
        other: Option<Payload>,
    ) -> GatewayResult<GatewayResponse> {
        let mut payload = order_payload(order)?;
        if let Some(profile_id) = prospect.profile_id.as_deref() {
            payload.insert("customer".to_string(), profile_id.into());
        }
        let payload = merge(payload, other.unwrap_or_default());

        debug!(operation = "charge_customer", customer = ?prospect.profile_id, "Creating charge");

        let response = self
            .delegate
            .create_charge(payload)
            .await
            .map_err(parse_error)?;

        Ok(GatewayResponse::transaction(response))
    }
}
