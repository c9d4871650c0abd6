//! Declarative field mapping between the domain model and vendor payloads.
//!
//! A [`FieldSchema`] is plain data: an ordered list of `(domain key, vendor
//! key)` pairs. Projecting a record through a schema carries every key the
//! record and the schema have in common to its vendor name and drops the
//! rest, so a schema doubles as an allow-list of what a vendor may receive.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{GatewayError, GatewayResult};

/// JSON object sent to, or received from, a vendor API
pub type Payload = Map<String, Value>;

/// Static rename table from domain field names to vendor field names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    fields: &'static [(&'static str, &'static str)],
}

impl FieldSchema {
    /// Create a schema from `(domain key, vendor key)` pairs
    pub const fn new(fields: &'static [(&'static str, &'static str)]) -> Self {
        Self { fields }
    }

    /// The `(domain key, vendor key)` pairs, in declaration order
    pub fn fields(&self) -> &'static [(&'static str, &'static str)] {
        self.fields
    }

    /// Vendor name for a domain key, if the schema knows it
    pub fn vendor_key(&self, domain_key: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(domain, _)| *domain == domain_key)
            .map(|(_, vendor)| *vendor)
    }

    /// Project `input` through the schema.
    ///
    /// Keys missing from `input`, or present with a `null` value, are left
    /// out of the result. Keys unknown to the schema are dropped.
    pub fn project(&self, input: &Payload) -> Payload {
        let mut output = Payload::new();
        for (domain, vendor) in self.fields {
            match input.get(*domain) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    output.insert((*vendor).to_string(), value.clone());
                }
            }
        }
        output
    }

    /// Project `input` and place the result under a single key.
    pub fn project_nested(&self, input: &Payload, key: &str) -> Payload {
        nest(key, self.project(input))
    }
}

/// Wrap `inner` as the only entry of a new object under `key`
pub fn nest(key: &str, inner: Payload) -> Payload {
    let mut output = Payload::new();
    output.insert(key.to_string(), Value::Object(inner));
    output
}

/// Shallow merge; entries of `overlay` replace entries of `base` on collision.
pub fn merge(mut base: Payload, overlay: Payload) -> Payload {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Serialize a domain record into a JSON object
pub fn to_payload<T: Serialize>(value: &T) -> GatewayResult<Payload> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Payload::new()),
        other => Err(GatewayError::Serialization {
            message: format!("expected a JSON object, got {other}"),
        }),
    }
}
