//! HTTP client tests against a local mock Stripe server

use std::collections::BTreeMap;

use paygate_core::{CreditCard, Order, PaymentGateway, Payload, Prospect, RefundOptions};
use paygate_stripe::{StripeApi, StripeClient, StripeError, StripeGateway, StripeOptions};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const API_KEY: &str = "sk_test_4eC39HqLyjWDarjtT1zdp7dc";

fn client_for(server: &MockServer) -> StripeClient {
    paygate_core::observability::init_test_tracing();
    StripeClient::new(
        API_KEY.to_string(),
        StripeOptions::default().with_api_base(server.uri()),
    )
    .unwrap()
}

fn form_fields(request: &Request) -> BTreeMap<String, String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(&request.body)
        .unwrap()
        .into_iter()
        .collect()
}

fn object(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

#[tokio::test]
async fn test_create_charge_posts_form_with_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header_exists("Idempotency-Key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ch_1", "paid": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .create_charge(object(json!({
            "amount": 10000,
            "currency": "USD",
            "source": {"object": "card", "number": "4242424242424242", "exp_month": "11"}
        })))
        .await
        .unwrap();

    assert_eq!(response, json!({"id": "ch_1", "paid": true}));

    let requests = server.received_requests().await.unwrap();
    let fields = form_fields(&requests[0]);
    assert_eq!(fields["amount"], "10000");
    assert_eq!(fields["currency"], "USD");
    assert_eq!(fields["source[object]"], "card");
    assert_eq!(fields["source[number]"], "4242424242424242");
    assert_eq!(fields["source[exp_month]"], "11");
    assert_eq!(fields.len(), 5);
}

#[tokio::test]
async fn test_each_request_gets_a_fresh_idempotency_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cus_1"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.create_customer(Payload::new()).await.unwrap();
    client.create_customer(Payload::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<_> = requests
        .iter()
        .map(|request| request.headers.get("Idempotency-Key").unwrap().clone())
        .collect();
    assert_ne!(keys[0], keys[1]);
}

#[tokio::test]
async fn test_optional_headers_are_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .and(header("Stripe-Version", "2020-08-27"))
        .and(header("Stripe-Account", "acct_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cus_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let options = StripeOptions::default()
        .with_api_base(server.uri())
        .with_api_version("2020-08-27")
        .with_account("acct_123");
    let client = StripeClient::new(API_KEY.to_string(), options).unwrap();

    client
        .create_customer(object(json!({"email": "ada@example.com"})))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refund_targets_the_charge() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/refunds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "re_1", "amount": 2500})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .create_refund("ch_1", object(json!({"amount": 2500})))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let fields = form_fields(&requests[0]);
    assert_eq!(fields["charge"], "ch_1");
    assert_eq!(fields["amount"], "2500");
    assert_eq!(fields.len(), 2);
}

#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let server = MockServer::start().await;
    let vendor_error = json!({
        "type": "card_error",
        "code": "card_declined",
        "decline_code": "insufficient_funds",
        "message": "Your card has insufficient funds.",
        "charge": "ch_declined"
    });
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({"error": vendor_error.clone()})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_charge(object(json!({"amount": 100, "currency": "USD"})))
        .await
        .unwrap_err();

    match &err {
        StripeError::Api {
            status, details, ..
        } => {
            assert_eq!(*status, 402);
            assert_eq!(details.code.as_deref(), Some("card_declined"));
            assert_eq!(details.decline_code.as_deref(), Some("insufficient_funds"));
            assert_eq!(details.charge.as_deref(), Some("ch_declined"));
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    assert_eq!(err.message().as_deref(), Some("Your card has insufficient funds."));
    assert_eq!(err.raw(), vendor_error);
}

#[tokio::test]
async fn test_non_json_success_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_charge(Payload::new())
        .await
        .unwrap_err();

    assert!(matches!(err, StripeError::Decode { ref body, .. } if body == "<html>ok</html>"));
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let client = StripeClient::new(
        API_KEY.to_string(),
        StripeOptions::default().with_api_base("http://127.0.0.1:1"),
    )
    .unwrap();

    let err = client.create_charge(Payload::new()).await.unwrap_err();

    assert!(matches!(err, StripeError::Transport { .. }));
    assert_eq!(err.raw()["type"], json!("transport_error"));
}

mod gateway_scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gateway_for(server: &MockServer) -> StripeGateway {
        paygate_core::observability::init_test_tracing();
        StripeGateway::with_options(API_KEY, StripeOptions::default().with_api_base(server.uri())).unwrap()
    }

    fn card() -> CreditCard {
        CreditCard::new()
            .with_credit_card_number("4242424242424242")
            .with_expiration_month("11")
            .with_expiration_year("2030")
            .with_cvv2("123")
    }

    #[tokio::test]
    async fn test_charge_then_partial_and_full_refund() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ch_100", "amount": 10000})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/refunds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "re_1"})))
            .expect(2)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let billing = Prospect::new().with_billing_postal_code("3212");

        let charge = gateway
            .submit_transaction(Order::new(Decimal::from(100)), &card(), &billing, None)
            .await
            .unwrap();
        let transaction_id = charge.transaction_id.unwrap();
        assert_eq!(transaction_id, "ch_100");

        gateway
            .refund_transaction(&transaction_id, Some(RefundOptions::new().with_amount(Decimal::from(25))))
            .await
            .unwrap();
        gateway.refund_transaction(&transaction_id, None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);

        let charge_fields = form_fields(&requests[0]);
        assert_eq!(charge_fields["amount"], "10000");
        assert_eq!(charge_fields["currency"], "USD");
        assert_eq!(charge_fields["source[object]"], "card");
        assert_eq!(charge_fields["source[cvc]"], "123");
        assert_eq!(charge_fields["source[address_zip]"], "3212");

        let partial = form_fields(&requests[1]);
        assert_eq!(partial["charge"], "ch_100");
        assert_eq!(partial["amount"], "2500");

        let full = form_fields(&requests[2]);
        assert_eq!(full["charge"], "ch_100");
        assert!(!full.contains_key("amount"));
    }

    #[tokio::test]
    async fn test_declined_card_surfaces_vendor_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {
                    "type": "card_error",
                    "code": "invalid_expiry_year",
                    "message": "Your card's expiration year is invalid.",
                    "param": "exp_year"
                }
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .submit_transaction(
                Order::new(Decimal::ONE),
                &card().with_expiration_year("2012"),
                &Prospect::new(),
                None,
            )
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Your card's expiration year is invalid.");
        assert_eq!(err.original().unwrap()["param"], json!("exp_year"));
    }

    #[tokio::test]
    async fn test_authorize_sends_capture_false() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ch_auth", "captured": false})))
            .mount(&server)
            .await;

        let response = gateway_for(&server)
            .authorize_transaction(Order::new(Decimal::TEN), &card(), &Prospect::new(), None)
            .await
            .unwrap();
        assert_eq!(response.transaction_id.as_deref(), Some("ch_auth"));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(form_fields(&requests[0])["capture"], "false");
    }

    #[tokio::test]
    async fn test_customer_profile_and_charge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cus_9"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ch_9"})))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let billing = Prospect::new().with_billing_email_address("ada@example.com");

        let profile = gateway
            .create_customer_profile(&card(), &billing, &Prospect::new(), None)
            .await
            .unwrap();
        let prospect = billing.with_profile_id(profile.profile_id.unwrap());
        let charge = gateway
            .charge_customer(Order::new(Decimal::new(500, 2)), &prospect, None)
            .await
            .unwrap();
        assert_eq!(charge.transaction_id.as_deref(), Some("ch_9"));

        let requests = server.received_requests().await.unwrap();
        let customer = form_fields(&requests[0]);
        assert_eq!(customer["email"], "ada@example.com");
        assert_eq!(customer["source[number]"], "4242424242424242");

        let charge = form_fields(&requests[1]);
        assert_eq!(charge["customer"], "cus_9");
        assert_eq!(charge["amount"], "500");
        assert!(!charge.keys().any(|key| key.starts_with("source")));
    }
}
