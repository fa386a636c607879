#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::{cell::RefCell, str::FromStr};

use alliedwallet::{
    Address, AlliedwalletAuthType, Card, CardNumber, ConnectorParams, CustomResult, Gateway,
    GatewayError, PaymentParams, ResultCode, TransportAdapter, TransportCall, TransportOptions,
    TransportUnavailable,
};
use masking::{PeekInterface, Secret};
use serde_json::json;

/// Scripted transport: replays one fixed reply and records every call. The
/// gateway borrows it, so tests can inspect the recorded calls afterwards.
struct MockTransport {
    reply: Result<serde_json::Value, TransportUnavailable>,
    calls: RefCell<Vec<TransportCall>>,
}

impl MockTransport {
    fn replying(reply: serde_json::Value) -> Self {
        Self {
            reply: Ok(reply),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn unavailable() -> Self {
        Self {
            reply: Err(TransportUnavailable),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TransportAdapter for &MockTransport {
    fn execute(
        &self,
        call: &TransportCall,
    ) -> CustomResult<serde_json::Value, TransportUnavailable> {
        self.calls.borrow_mut().push(call.clone());
        match &self.reply {
            Ok(value) => Ok(value.clone()),
            Err(err) => Err(err.clone().into()),
        }
    }
}

fn rest_auth() -> AlliedwalletAuthType {
    AlliedwalletAuthType::Rest {
        merchant_id: Secret::new("merchant-guid".to_string()),
        oauth_token: Secret::new("oauth-token".to_string()),
    }
}

fn soap_auth() -> AlliedwalletAuthType {
    AlliedwalletAuthType::Soap {
        merchant_id: Secret::new("merchant-guid".to_string()),
    }
}

fn test_card() -> Card {
    Card {
        first_name: Secret::new("Example".to_string()),
        last_name: Secret::new("Customer".to_string()),
        number: CardNumber::from_str("4242424242424242").unwrap(),
        exp_month: Secret::new("12".to_string()),
        exp_year: Secret::new("2090".to_string()),
        cvv: Secret::new("123".to_string()),
        email: Some(Secret::new("customer@example.com".to_string())),
        billing: Address {
            line1: Some(Secret::new("1 Main St".to_string())),
            city: Some("Anytown".to_string()),
            country: Some("US".to_string()),
            ..Default::default()
        },
        shipping: None,
    }
}

fn card_sale_params() -> PaymentParams {
    PaymentParams {
        amount: Some("12.00".to_string()),
        currency: Some("usd".to_string()),
        site_id: Some(Secret::new("site-guid".to_string())),
        tracking_id: Some("order-77".to_string()),
        card: Some(test_card()),
        client_ip: Some(Secret::new("203.0.113.9".to_string())),
        ..Default::default()
    }
}

#[test]
fn rest_purchase_round_trip() {
    let transport = MockTransport::replying(json!({
        "status": "Successful",
        "id": "sale-1",
        "message": "Approved",
    }));
    let gateway = Gateway::new(ConnectorParams::default(), rest_auth(), &transport);

    let result = gateway.purchase(&card_sale_params()).unwrap();
    assert!(result.success);
    assert_eq!(result.reference.as_deref(), Some("sale-1"));
    assert_eq!(result.code, Some(ResultCode::Rest("Successful".to_string())));
}

#[test]
fn rest_call_is_made_exactly_once_with_the_routed_url() {
    let transport = MockTransport::replying(json!({ "status": "Successful", "id": "sale-1" }));
    let gateway = Gateway::new(ConnectorParams::default(), rest_auth(), &transport);

    gateway.purchase(&card_sale_params()).unwrap();

    assert_eq!(transport.call_count(), 1);
    let calls = transport.calls.borrow();
    let call = calls.first().unwrap();
    assert_eq!(
        call.url,
        "https://api.alliedwallet.com/merchants/merchant-guid/saletransactions"
    );
    assert_eq!(call.payload["TrackingId"], "order-77");
    match &call.options {
        TransportOptions::Rest {
            bearer_token,
            require_tls_1_2,
        } => {
            assert_eq!(bearer_token.peek(), "oauth-token");
            assert!(require_tls_1_2);
        }
        TransportOptions::Soap { .. } => panic!("rest call carried soap options"),
    }
}

#[test]
fn decline_is_ok_with_success_false() {
    let transport = MockTransport::replying(json!({
        "status": "Declined",
        "id": "sale-2",
        "message": "Insufficient funds",
    }));
    let gateway = Gateway::new(ConnectorParams::default(), rest_auth(), &transport);

    let result = gateway.purchase(&card_sale_params()).unwrap();
    assert!(!result.success);
    assert_eq!(result.message.as_deref(), Some("Insufficient funds"));
}

#[test]
fn transport_failure_is_not_a_decline() {
    let transport = MockTransport::unavailable();
    let gateway = Gateway::new(ConnectorParams::default(), rest_auth(), &transport);

    let err = gateway.purchase(&card_sale_params()).unwrap_err();
    assert_eq!(err.current_context(), &GatewayError::TransportUnavailable);
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn validation_failure_never_reaches_the_transport() {
    let transport = MockTransport::replying(json!({ "status": "Successful" }));
    let gateway = Gateway::new(ConnectorParams::default(), rest_auth(), &transport);

    let mut params = card_sale_params();
    params.currency = None;
    let err = gateway.purchase(&params).unwrap_err();
    assert_eq!(err.current_context(), &GatewayError::InvalidRequest);
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn tokenize_surfaces_the_token_as_reference() {
    let transport = MockTransport::replying(json!({ "status": "Successful", "id": "token-9" }));
    let gateway = Gateway::new(ConnectorParams::default(), rest_auth(), &transport);

    let params = PaymentParams {
        card: Some(test_card()),
        ..Default::default()
    };
    let result = gateway.create_card(&params).unwrap();
    assert!(result.success);
    assert_eq!(result.reference.as_deref(), Some("token-9"));

    let calls = transport.calls.borrow();
    let call = calls.first().unwrap();
    assert_eq!(
        call.url,
        "https://api.alliedwallet.com/merchants/merchant-guid/creditcardtokens"
    );
}

#[test]
fn soap_void_round_trip() {
    let transport = MockTransport::replying(json!({
        "VoidResult": { "Status": 1, "TransactionID": "txn-4", "Message": "OK" }
    }));
    let gateway = Gateway::new(ConnectorParams::default(), soap_auth(), &transport);

    let params = PaymentParams {
        transaction_reference: Some("txn-4".to_string()),
        ..Default::default()
    };
    let result = gateway.void(&params).unwrap();
    assert!(result.success);
    assert_eq!(result.reference.as_deref(), Some("txn-4"));
    assert_eq!(result.code, Some(ResultCode::Soap(1)));

    assert_eq!(transport.call_count(), 1);
    let calls = transport.calls.borrow();
    let call = calls.first().unwrap();
    assert_eq!(call.action, "Void");
    assert_eq!(call.payload["MerchantID"], "merchant-guid");
}

#[test]
fn soap_reply_without_the_result_element_is_malformed() {
    let transport = MockTransport::replying(json!({ "SomethingElse": { "Status": 1 } }));
    let gateway = Gateway::new(ConnectorParams::default(), soap_auth(), &transport);

    let params = PaymentParams {
        transaction_reference: Some("txn-4".to_string()),
        ..Default::default()
    };
    let err = gateway.void(&params).unwrap_err();
    assert_eq!(err.current_context(), &GatewayError::MalformedReply);
}

#[test]
fn soap_authorize_is_refused_before_any_call() {
    let transport = MockTransport::replying(json!({}));
    let gateway = Gateway::new(ConnectorParams::default(), soap_auth(), &transport);

    let err = gateway.authorize(&card_sale_params()).unwrap_err();
    assert_eq!(err.current_context(), &GatewayError::InvalidRequest);
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn soap_status_zero_is_a_decline_with_its_code() {
    let transport = MockTransport::replying(json!({
        "ExecuteCreditCardResult": { "Status": 0, "Message": "Declined", "TransactionID": "" }
    }));
    let gateway = Gateway::new(ConnectorParams::default(), soap_auth(), &transport);

    let result = gateway.purchase(&card_sale_params()).unwrap();
    assert!(!result.success);
    assert_eq!(result.code, Some(ResultCode::Soap(0)));
    assert_eq!(result.reference, None);
}
