//! Rename tables from the domain model to Stripe field names.

use paygate_core::FieldSchema;

/// Card fields of a card `source` hash
pub const CARD_SCHEMA: FieldSchema = FieldSchema::new(&[
    ("creditCardNumber", "number"),
    ("expirationMonth", "exp_month"),
    ("expirationYear", "exp_year"),
    ("cvv2", "cvc"),
    ("cardHolder", "name"),
]);

/// Billing address fields of a card `source` hash
pub const BILLING_SCHEMA: FieldSchema = FieldSchema::new(&[
    ("billingAddress1", "address_line1"),
    ("billingAddress2", "address_line2"),
    ("billingCity", "address_city"),
    ("billingPostalCode", "address_zip"),
    ("billingState", "address_state"),
    ("billingCountry", "address_country"),
]);

/// Address fields of a customer's `shipping[address]` hash
pub const SHIPPING_ADDRESS_SCHEMA: FieldSchema = FieldSchema::new(&[
    ("shippingAddress1", "line1"),
    ("shippingAddress2", "line2"),
    ("shippingCity", "city"),
    ("shippingPostalCode", "postal_code"),
    ("shippingState", "state"),
    ("shippingCountry", "country"),
]);
