//! Stripe's form encoding for nested payloads.
//!
//! Stripe takes `application/x-www-form-urlencoded` bodies and spells nesting
//! with brackets: `{"source": {"number": "4242"}}` is sent as
//! `source[number]=4242`, and array items as `items[0]`.

use paygate_core::Payload;
use serde_json::Value;

use crate::error::StripeError;

/// Encode a payload as a form body. `null` values are omitted.
pub fn encode(payload: &Payload) -> Result<String, StripeError> {
    let pruned = without_nulls(payload);
    Ok(serde_qs::to_string(&pruned)?)
}

fn without_nulls(payload: &Payload) -> Payload {
    payload
        .iter()
        .filter_map(|(key, value)| prune(value).map(|value| (key.clone(), value)))
        .collect()
}

fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => Some(Value::Object(without_nulls(map))),
        Value::Array(items) => Some(Value::Array(items.iter().filter_map(prune).collect())),
        other => Some(other.clone()),
    }
}
