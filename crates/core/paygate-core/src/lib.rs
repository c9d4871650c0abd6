//! # Paygate Core
//!
//! Gateway-agnostic building blocks for payment gateway adaptors:
//!
//! - **Uniform interface**: the [`PaymentGateway`] trait every vendor adaptor implements
//! - **Domain model**: [`CreditCard`], [`Prospect`], [`Order`] and [`RefundOptions`]
//! - **Field mapping**: declarative [`FieldSchema`] rename tables and payload merging
//! - **Amounts**: exact major-to-minor currency unit conversion
//! - **Errors**: the uniform [`GatewayError`] callers see regardless of vendor
//! - **Configuration**: file and environment loading via [`GatewayConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use paygate_core::{FieldSchema, to_payload, CreditCard};
//!
//! const CARD: FieldSchema = FieldSchema::new(&[("creditCardNumber", "number"), ("cvv2", "cvc")]);
//!
//! let card = CreditCard::new().with_credit_card_number("4242424242424242").with_cvv2("123");
//! let projected = CARD.project(&to_payload(&card).unwrap());
//! assert_eq!(projected["number"], "4242424242424242");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod amount;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mapping;
pub mod model;
pub mod observability;

pub use amount::{currency_or_default, to_minor_units, DEFAULT_CURRENCY};
pub use self::config::GatewayConfig;
pub use error::{GatewayError, GatewayResult, REMOTE_ERROR_FALLBACK};
pub use gateway::{GatewayResponse, PaymentGateway};
pub use mapping::{merge, nest, to_payload, FieldSchema, Payload};
pub use model::{CreditCard, Order, Prospect, RefundOptions};

/// Version information for the Paygate Core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the Paygate Core library
pub const NAME: &str = env!("CARGO_PKG_NAME");
