//! Request and response shapes for the legacy SOAP interface.
//!
//! Every method payload opens with `MerchantID`; the rest of the vocabulary
//! is per method. Replies arrive as one result object nested under a
//! per-method element name, which the normalizer looks up before reading
//! any field.

use error_stack::ResultExt;
use masking::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    consts,
    errors::{ConnectorError, CustomResult},
    types::{
        Action, GatewayResult, Operation, PaymentMethod, PaymentParams, ResolvedRequest,
        ResultCode, SoapMethod,
    },
};

/// Card sale carried over `ExecuteCreditCard`/`ExecuteCreditCard2`. The
/// second method is the same call plus `MerchantReference`.
#[derive(Debug, Serialize)]
pub struct SoapSaleRequest {
    #[serde(rename = "MerchantID")]
    merchant_id: Secret<String>,
    #[serde(rename = "SiteID")]
    site_id: Secret<String>,
    #[serde(rename = "IPAddress", skip_serializing_if = "Option::is_none")]
    ip_address: Option<Secret<String>>,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "CurrencyID")]
    currency: String,
    #[serde(rename = "FirstName")]
    first_name: Secret<String>,
    #[serde(rename = "LastName")]
    last_name: Secret<String>,
    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none")]
    phone: Option<Secret<String>>,
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none")]
    address: Option<Secret<String>>,
    #[serde(rename = "City", skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(rename = "State", skip_serializing_if = "Option::is_none")]
    state: Option<Secret<String>>,
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(rename = "ZipCode", skip_serializing_if = "Option::is_none")]
    zip_code: Option<Secret<String>>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    email: Option<Secret<String>>,
    #[serde(rename = "CardNumber")]
    card_number: crate::card::CardNumber,
    #[serde(rename = "CardName")]
    card_name: Secret<String>,
    #[serde(rename = "ExpiryMonth")]
    expiry_month: Secret<String>,
    #[serde(rename = "ExpiryYear")]
    expiry_year: Secret<String>,
    #[serde(rename = "CardCVV")]
    card_cvv: Secret<String>,
    #[serde(rename = "MerchantReference", skip_serializing_if = "Option::is_none")]
    merchant_reference: Option<String>,
}

/// Capture and void payload: merchant plus the transaction to act on.
#[derive(Debug, Serialize)]
pub struct SoapReferenceRequest {
    #[serde(rename = "MerchantID")]
    merchant_id: Secret<String>,
    #[serde(rename = "TransactionID")]
    transaction_id: String,
}

/// Refund payload. The amount is mandatory, which pins the method to
/// `PartialRefund`; a full refund names the full amount.
#[derive(Debug, Serialize)]
pub struct SoapRefundRequest {
    #[serde(rename = "MerchantID")]
    merchant_id: Secret<String>,
    #[serde(rename = "TransactionID")]
    transaction_id: String,
    #[serde(rename = "RefundAmount")]
    refund_amount: String,
}

fn required<'a, T>(
    value: &'a Option<T>,
    field_name: &'static str,
) -> CustomResult<&'a T, ConnectorError> {
    value
        .as_ref()
        .ok_or(ConnectorError::MissingRequiredField { field_name }.into())
}

fn encode<T: Serialize>(
    method: SoapMethod,
    request: &T,
) -> CustomResult<ResolvedRequest, ConnectorError> {
    let payload =
        serde_json::to_value(request).change_context(ConnectorError::RequestEncodingFailed)?;
    Ok(ResolvedRequest {
        action: Action::Soap(method),
        payload,
    })
}

const fn not_supported(message: &'static str) -> ConnectorError {
    ConnectorError::NotSupported {
        message,
        connector: "alliedwallet soap",
    }
}

/// Routes one operation to its SOAP method. Operations the legacy interface
/// never shipped fail as structured input errors before any network call.
pub fn build_request(
    operation: Operation,
    params: &PaymentParams,
    merchant_id: &Secret<String>,
) -> CustomResult<ResolvedRequest, ConnectorError> {
    match operation {
        Operation::Purchase => build_sale(params, merchant_id),
        Operation::Authorize => Err(not_supported("authorization").into()),
        Operation::Tokenize => Err(not_supported("card tokens").into()),
        Operation::Capture => {
            let request = SoapReferenceRequest {
                merchant_id: merchant_id.clone(),
                transaction_id: required(&params.transaction_reference, "transaction_reference")?
                    .clone(),
            };
            encode(SoapMethod::Capture, &request)
        }
        Operation::Refund => {
            let request = SoapRefundRequest {
                merchant_id: merchant_id.clone(),
                transaction_id: required(&params.transaction_reference, "transaction_reference")?
                    .clone(),
                refund_amount: required(&params.amount, "amount")?.clone(),
            };
            encode(SoapMethod::PartialRefund, &request)
        }
        Operation::Void => {
            let request = SoapReferenceRequest {
                merchant_id: merchant_id.clone(),
                transaction_id: required(&params.transaction_reference, "transaction_reference")?
                    .clone(),
            };
            encode(SoapMethod::Void, &request)
        }
    }
}

/// SOAP sales always need raw card data; token and recurring references
/// have no method here and are refused up front. A tracking id selects
/// `ExecuteCreditCard2` and rides as `MerchantReference`.
fn build_sale(
    params: &PaymentParams,
    merchant_id: &Secret<String>,
) -> CustomResult<ResolvedRequest, ConnectorError> {
    let card = match PaymentMethod::resolve(params)? {
        PaymentMethod::RawCard(card) => card,
        PaymentMethod::StoredReference(_) => return Err(not_supported("card tokens").into()),
        PaymentMethod::RecurringReference(_) => {
            return Err(not_supported("recurring re-charges").into())
        }
    };
    card.validate()?;

    let method = if params.tracking_id.is_some() {
        SoapMethod::ExecuteCreditCard2
    } else {
        SoapMethod::ExecuteCreditCard
    };
    let request = SoapSaleRequest {
        merchant_id: merchant_id.clone(),
        site_id: required(&params.site_id, "site_id")?.clone(),
        ip_address: params.client_ip.clone(),
        amount: required(&params.amount, "amount")?.clone(),
        currency: required(&params.currency, "currency")?.to_uppercase(),
        first_name: card.first_name.clone(),
        last_name: card.last_name.clone(),
        phone: card.billing.phone.clone(),
        address: card.billing.line1.clone(),
        city: card.billing.city.clone(),
        state: card.billing.state.clone(),
        country: card.billing.country.clone(),
        zip_code: card.billing.zip.clone(),
        email: card.email.clone(),
        card_number: card.number.clone(),
        card_name: card.name_on_card(),
        expiry_month: card.exp_month.clone(),
        expiry_year: card.exp_year.clone(),
        card_cvv: card.cvv.clone(),
        merchant_reference: params.tracking_id.clone(),
    };
    encode(method, &request)
}

/// The result object every method replies with, once unwrapped from its
/// per-method element.
#[derive(Debug, Deserialize)]
pub struct SoapResult {
    /// Integer state. Zero is a real non-success code, distinct from the
    /// field being absent; absence makes the whole reply malformed.
    #[serde(rename = "Status")]
    pub status: Option<i64>,
    #[serde(rename = "TransactionID")]
    pub transaction_id: Option<String>,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}

/// Unwraps the per-method result element and collapses it into the uniform
/// result. A reply without the expected element, or without a status code,
/// is malformed.
pub fn normalize_response(
    method: SoapMethod,
    raw: serde_json::Value,
) -> CustomResult<GatewayResult, ConnectorError> {
    let wrapped = raw
        .get(method.result_name())
        .ok_or(ConnectorError::ResponseDeserializationFailed)?
        .clone();
    let result: SoapResult = serde_json::from_value(wrapped)
        .change_context(ConnectorError::ResponseDeserializationFailed)?;
    let status = result
        .status
        .ok_or(ConnectorError::ResponseDeserializationFailed)?;
    let success = status == consts::SOAP_SUCCESS_STATUS;
    tracing::debug!(success, status, method = method.name(), "normalized soap reply");
    Ok(GatewayResult {
        success,
        reference: result.transaction_id.filter(|id| !id.is_empty()),
        message: result.message,
        code: Some(ResultCode::Soap(status)),
    })
}
