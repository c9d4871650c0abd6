//! # Paygate Stripe
//!
//! Stripe adaptor for the Paygate [`PaymentGateway`] interface.
//!
//! The adaptor renames domain fields to Stripe's names through static
//! [`schema`] tables, sends amounts in cents, and turns every Stripe failure
//! into a [`paygate_core::GatewayError`] whose `original` is the raw Stripe
//! error.
//!
//! ```rust,no_run
//! use paygate_stripe::StripeGateway;
//! use paygate_core::{CreditCard, Order, PaymentGateway, Prospect};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> paygate_core::GatewayResult<()> {
//! let gateway = StripeGateway::new("sk_test_...")?;
//!
//! let card = CreditCard::new()
//!     .with_credit_card_number("4242424242424242")
//!     .with_expiration_month("11")
//!     .with_expiration_year("2030")
//!     .with_cvv2("123");
//!
//! let charge = gateway
//!     .submit_transaction(Order::new(Decimal::new(4999, 2)), &card, &Prospect::new(), None)
//!     .await?;
//! println!("charged {:?}", charge.transaction_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod form;
pub mod gateway;
pub mod schema;

pub use client::{Charges, Customers, StripeApi, StripeClient, StripeOptions, DEFAULT_API_BASE};
pub use error::{ErrorDetails, StripeError};
pub use gateway::StripeGateway;
pub use paygate_core::PaymentGateway;
