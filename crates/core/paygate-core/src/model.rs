//! Domain records callers build before talking to a gateway.
//!
//! Field names serialize in camelCase (`creditCardNumber`, `billingCity`),
//! which is the vocabulary the gateway field schemas are written against.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::mapping::Payload;

/// Generates `with_*` builder methods for optional string fields
macro_rules! string_setters {
    ($($(#[$meta:meta])* $setter:ident => $field:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $setter(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

/// Payment card details
///
/// The card's own fields are wiped from memory when it is dropped; copies
/// made into request payloads are not. The card number and security code
/// never appear in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    /// Primary account number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_number: Option<String>,
    /// Expiration month, `1`-`12`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<String>,
    /// Expiration year, four digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<String>,
    /// Card security code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv2: Option<String>,
    /// Name printed on the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_holder: Option<String>,
}

impl CreditCard {
    /// Create an empty card
    pub fn new() -> Self {
        Self::default()
    }

    string_setters! {
        /// Set the card number
        with_credit_card_number => credit_card_number,
        /// Set the expiration month
        with_expiration_month => expiration_month,
        /// Set the expiration year
        with_expiration_year => expiration_year,
        /// Set the security code
        with_cvv2 => cvv2,
        /// Set the card holder name
        with_card_holder => card_holder,
    }

    /// Last four digits of the card number, if known
    pub fn last_four(&self) -> Option<&str> {
        let number = self.credit_card_number.as_deref()?;
        number.get(number.len().saturating_sub(4)..)
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("last_four", &self.last_four())
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("cvv2", &self.cvv2.as_ref().map(|_| "***"))
            .field("card_holder", &self.card_holder)
            .finish()
    }
}

/// Billing and shipping contact record
///
/// `profile_id` holds the gateway's stored-customer identifier once a
/// customer profile has been created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    /// Gateway customer profile identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,

    /// Billing first name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_first_name: Option<String>,
    /// Billing last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_last_name: Option<String>,
    /// Billing email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_email_address: Option<String>,
    /// Billing phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_phone: Option<String>,
    /// Billing address, first line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address1: Option<String>,
    /// Billing address, second line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address2: Option<String>,
    /// Billing city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_city: Option<String>,
    /// Billing postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_postal_code: Option<String>,
    /// Billing state or region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_state: Option<String>,
    /// Billing country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_country: Option<String>,

    /// Shipping first name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_first_name: Option<String>,
    /// Shipping last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_last_name: Option<String>,
    /// Shipping phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_phone: Option<String>,
    /// Shipping address, first line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address1: Option<String>,
    /// Shipping address, second line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address2: Option<String>,
    /// Shipping city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_city: Option<String>,
    /// Shipping postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_postal_code: Option<String>,
    /// Shipping state or region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_state: Option<String>,
    /// Shipping country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_country: Option<String>,
}

impl Prospect {
    /// Create an empty prospect
    pub fn new() -> Self {
        Self::default()
    }

    string_setters! {
        /// Set the gateway customer profile identifier
        with_profile_id => profile_id,
        /// Set the billing first name
        with_billing_first_name => billing_first_name,
        /// Set the billing last name
        with_billing_last_name => billing_last_name,
        /// Set the billing email address
        with_billing_email_address => billing_email_address,
        /// Set the billing phone number
        with_billing_phone => billing_phone,
        /// Set the first billing address line
        with_billing_address1 => billing_address1,
        /// Set the second billing address line
        with_billing_address2 => billing_address2,
        /// Set the billing city
        with_billing_city => billing_city,
        /// Set the billing postal code
        with_billing_postal_code => billing_postal_code,
        /// Set the billing state
        with_billing_state => billing_state,
        /// Set the billing country
        with_billing_country => billing_country,
        /// Set the shipping first name
        with_shipping_first_name => shipping_first_name,
        /// Set the shipping last name
        with_shipping_last_name => shipping_last_name,
        /// Set the shipping phone number
        with_shipping_phone => shipping_phone,
        /// Set the first shipping address line
        with_shipping_address1 => shipping_address1,
        /// Set the second shipping address line
        with_shipping_address2 => shipping_address2,
        /// Set the shipping city
        with_shipping_city => shipping_city,
        /// Set the shipping postal code
        with_shipping_postal_code => shipping_postal_code,
        /// Set the shipping state
        with_shipping_state => shipping_state,
        /// Set the shipping country
        with_shipping_country => shipping_country,
    }

    /// Shipping first and last name joined by a space, if either is set
    pub fn shipping_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.shipping_first_name, &self.shipping_last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// An amount to collect, in major currency units
///
/// Fields in `extra` (description, metadata, statement descriptor, ...) are
/// passed to the gateway unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Amount in major units, e.g. dollars
    pub amount: Decimal,
    /// ISO 4217 currency code; gateways default it when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Additional vendor fields
    #[serde(flatten)]
    pub extra: Payload,
}

impl Order {
    /// Create an order for `amount` major units
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            currency: None,
            extra: Payload::new(),
        }
    }

    /// Set the currency
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Add a pass-through field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Options for refunding or voiding a transaction
///
/// Without an amount the whole captured amount is refunded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundOptions {
    /// Partial amount in major units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Additional vendor fields
    #[serde(flatten)]
    pub extra: Payload,
}

impl RefundOptions {
    /// Refund the full amount
    pub fn new() -> Self {
        Self::default()
    }

    /// Refund a partial amount
    #[must_use]
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Add a pass-through field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
