//! Shared request/response model: the parameter set consumed by both
//! transports, the routing enums, and the normalized result.

use masking::Secret;

use crate::{
    card::Card,
    errors::{ConnectorError, CustomResult},
};

/// Which wire interface a gateway instance talks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Transport {
    Rest,
    Soap,
}

/// The logical operations the adapter exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Purchase,
    Authorize,
    Capture,
    Refund,
    Void,
    Tokenize,
}

/// The parameter set for one call. Built by the caller, consumed whole by
/// the request builder; never mutated during mapping.
///
/// `amount` is a pre-formatted decimal string passed through verbatim; the
/// adapter does no arithmetic on it. `merchant_id` is not here, it rides on
/// the credentials.
#[derive(Debug, Clone, Default)]
pub struct PaymentParams {
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub site_id: Option<Secret<String>>,
    /// Caller-side correlation id, echoed by the gateway.
    pub tracking_id: Option<String>,
    pub card: Option<Card>,
    pub client_ip: Option<Secret<String>>,
    /// Reference to a prior gateway transaction (capture/refund/void source,
    /// or the sale a recurring re-charge descends from).
    pub transaction_reference: Option<String>,
    /// Stored-card token from a prior tokenize call.
    pub card_reference: Option<Secret<String>>,
    pub test_mode: bool,
}

/// How a sale is funded, resolved once per call with a fixed precedence:
/// a recurring reference wins over a stored-card reference, which wins over
/// raw card data.
#[derive(Debug)]
pub enum PaymentMethod<'a> {
    RecurringReference(&'a str),
    StoredReference(&'a Secret<String>),
    RawCard(&'a Card),
}

impl<'a> PaymentMethod<'a> {
    pub fn resolve(params: &'a PaymentParams) -> CustomResult<Self, ConnectorError> {
        if let Some(reference) = params.transaction_reference.as_deref() {
            return Ok(Self::RecurringReference(reference));
        }
        if let Some(token) = params.card_reference.as_ref() {
            return Ok(Self::StoredReference(token));
        }
        params
            .card
            .as_ref()
            .map(Self::RawCard)
            .ok_or(ConnectorError::MissingRequiredField { field_name: "card" }.into())
    }
}

/// REST action, appended to the merchant-scoped URL as a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RestAction {
    SaleTransactions,
    TokenSaleTransactions,
    RecurringTransactions,
    AuthorizeTransactions,
    CaptureTransactions,
    RefundTransactions,
    VoidTransactions,
    CreditCardTokens,
}

impl RestAction {
    pub const fn path(self) -> &'static str {
        match self {
            Self::SaleTransactions => "saletransactions",
            Self::TokenSaleTransactions => "tokensaletransactions",
            Self::RecurringTransactions => "recurringtransactions",
            Self::AuthorizeTransactions => "authorizetransactions",
            Self::CaptureTransactions => "capturetransactions",
            Self::RefundTransactions => "refundtransactions",
            Self::VoidTransactions => "voidtransactions",
            Self::CreditCardTokens => "creditcardtokens",
        }
    }
}

/// SOAP method. The wrapped result element each method replies under is
/// fixed configuration data, looked up by [`SoapMethod::result_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SoapMethod {
    ExecuteCreditCard,
    ExecuteCreditCard2,
    Capture,
    PartialRefund,
    Void,
}

impl SoapMethod {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExecuteCreditCard => "ExecuteCreditCard",
            Self::ExecuteCreditCard2 => "ExecuteCreditCard2",
            Self::Capture => "Capture",
            Self::PartialRefund => "PartialRefund",
            Self::Void => "Void",
        }
    }

    pub const fn result_name(self) -> &'static str {
        match self {
            Self::ExecuteCreditCard => "ExecuteCreditCardResult",
            Self::ExecuteCreditCard2 => "ExecuteCreditCard2Result",
            Self::Capture => "CaptureResult",
            Self::PartialRefund => "PartialRefundResult",
            Self::Void => "VoidResult",
        }
    }
}

/// The routed destination of a built request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rest(RestAction),
    Soap(SoapMethod),
}

/// A fully built request: where it goes and what it carries. The payload is
/// an ordered JSON mapping with every unset optional already stripped.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub action: Action,
    pub payload: serde_json::Value,
}

/// Transport-specific result code, deliberately not unified: the REST
/// interface speaks status strings, the SOAP interface integer states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCode {
    Rest(String),
    Soap(i64),
}

/// The uniform outcome of any operation on either transport. A decline is a
/// `success == false` value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResult {
    pub success: bool,
    /// Gateway-assigned transaction (or token) reference. Absent when the
    /// gateway sent none, including a SOAP empty-string `TransactionID`.
    pub reference: Option<String>,
    pub message: Option<String>,
    pub code: Option<ResultCode>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use super::*;
    use crate::card::{Address, Card, CardNumber};

    fn test_card() -> Card {
        Card {
            first_name: Secret::new("Example".to_string()),
            last_name: Secret::new("Customer".to_string()),
            number: CardNumber::from_str("4242424242424242").unwrap(),
            exp_month: Secret::new("12".to_string()),
            exp_year: Secret::new("2090".to_string()),
            cvv: Secret::new("123".to_string()),
            email: None,
            billing: Address::default(),
            shipping: None,
        }
    }

    #[test]
    fn recurring_reference_wins_over_token_and_card() {
        let params = PaymentParams {
            transaction_reference: Some("txn-1".to_string()),
            card_reference: Some(Secret::new("tok-1".to_string())),
            card: Some(test_card()),
            ..Default::default()
        };
        assert!(matches!(
            PaymentMethod::resolve(&params).unwrap(),
            PaymentMethod::RecurringReference("txn-1")
        ));
    }

    #[test]
    fn stored_reference_wins_over_card() {
        let params = PaymentParams {
            card_reference: Some(Secret::new("tok-1".to_string())),
            card: Some(test_card()),
            ..Default::default()
        };
        assert!(matches!(
            PaymentMethod::resolve(&params).unwrap(),
            PaymentMethod::StoredReference(_)
        ));
    }

    #[test]
    fn no_funding_source_is_a_missing_card() {
        let err = PaymentMethod::resolve(&PaymentParams::default()).unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConnectorError::MissingRequiredField { field_name: "card" }
        );
    }

    #[test]
    fn soap_result_names_follow_methods() {
        assert_eq!(
            SoapMethod::ExecuteCreditCard2.result_name(),
            "ExecuteCreditCard2Result"
        );
        assert_eq!(SoapMethod::Void.result_name(), "VoidResult");
    }
}
