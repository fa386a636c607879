//! Request and response shapes for the JSON interface.
//!
//! Field names are the processor's, verbatim, including its mixed casing
//! (`amount` next to `SiteId` next to `cardNumber`). Optionals carry
//! `skip_serializing_if` so an unset field is dropped from the payload
//! rather than sent empty; a deliberately set value always survives.

use error_stack::ResultExt;
use masking::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    card::{Address, Card, CardNumber},
    consts,
    errors::{ConnectorError, CustomResult},
    types::{
        Action, GatewayResult, Operation, PaymentMethod, PaymentParams, ResolvedRequest,
        RestAction, ResultCode,
    },
};

/// Billing block shared by card sales and tokenization. First and last name
/// are mandatory; the rest of the address is passed through when present.
#[derive(Debug, Serialize)]
pub struct BillingFields {
    #[serde(rename = "FirstName")]
    first_name: Secret<String>,
    #[serde(rename = "LastName")]
    last_name: Secret<String>,
    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none")]
    phone: Option<Secret<String>>,
    #[serde(rename = "AddressLine1", skip_serializing_if = "Option::is_none")]
    address_line1: Option<Secret<String>>,
    #[serde(rename = "AddressLine2", skip_serializing_if = "Option::is_none")]
    address_line2: Option<Secret<String>>,
    #[serde(rename = "City", skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(rename = "State", skip_serializing_if = "Option::is_none")]
    state: Option<Secret<String>>,
    #[serde(rename = "CountryId", skip_serializing_if = "Option::is_none")]
    country_id: Option<String>,
    #[serde(rename = "PostalCode", skip_serializing_if = "Option::is_none")]
    postal_code: Option<Secret<String>>,
}

impl From<&Card> for BillingFields {
    fn from(card: &Card) -> Self {
        Self {
            first_name: card.first_name.clone(),
            last_name: card.last_name.clone(),
            phone: card.billing.phone.clone(),
            address_line1: card.billing.line1.clone(),
            address_line2: card.billing.line2.clone(),
            city: card.billing.city.clone(),
            state: card.billing.state.clone(),
            country_id: card.billing.country.clone(),
            postal_code: card.billing.zip.clone(),
        }
    }
}

/// Shipping parallel of [`BillingFields`], emitted only when a shipping
/// address was supplied. The holder name doubles as the ship-to name.
#[derive(Debug, Serialize)]
pub struct ShippingFields {
    #[serde(rename = "ShippingFirstName")]
    first_name: Secret<String>,
    #[serde(rename = "ShippingLastName")]
    last_name: Secret<String>,
    #[serde(rename = "ShippingPhone", skip_serializing_if = "Option::is_none")]
    phone: Option<Secret<String>>,
    #[serde(
        rename = "ShippingAddressLine1",
        skip_serializing_if = "Option::is_none"
    )]
    address_line1: Option<Secret<String>>,
    #[serde(
        rename = "ShippingAddressLine2",
        skip_serializing_if = "Option::is_none"
    )]
    address_line2: Option<Secret<String>>,
    #[serde(rename = "ShippingCity", skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(rename = "ShippingState", skip_serializing_if = "Option::is_none")]
    state: Option<Secret<String>>,
    #[serde(rename = "ShippingCountryId", skip_serializing_if = "Option::is_none")]
    country_id: Option<String>,
    #[serde(rename = "ShippingPostalCode", skip_serializing_if = "Option::is_none")]
    postal_code: Option<Secret<String>>,
}

impl ShippingFields {
    fn from_card(card: &Card, shipping: &Address) -> Self {
        Self {
            first_name: card.first_name.clone(),
            last_name: card.last_name.clone(),
            phone: shipping.phone.clone(),
            address_line1: shipping.line1.clone(),
            address_line2: shipping.line2.clone(),
            city: shipping.city.clone(),
            state: shipping.state.clone(),
            country_id: shipping.country.clone(),
            postal_code: shipping.zip.clone(),
        }
    }
}

/// Sale or authorization funded by raw card data.
#[derive(Debug, Serialize)]
pub struct CardSaleRequest {
    amount: String,
    #[serde(rename = "SiteId")]
    site_id: Secret<String>,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "TrackingId")]
    tracking_id: String,
    #[serde(rename = "IsInitialForRecurring")]
    is_initial_for_recurring: &'static str,
    #[serde(flatten)]
    billing: BillingFields,
    #[serde(flatten)]
    shipping: Option<ShippingFields>,
    #[serde(rename = "IpAddress")]
    ip_address: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Secret<String>>,
    #[serde(rename = "cardNumber")]
    card_number: CardNumber,
    #[serde(rename = "NameOnCard")]
    name_on_card: Secret<String>,
    #[serde(rename = "ExpirationMonth")]
    expiration_month: Secret<String>,
    #[serde(rename = "ExpirationYear")]
    expiration_year: Secret<String>,
    #[serde(rename = "CvvCode")]
    cvv_code: Secret<String>,
}

/// Sale or authorization funded by a stored-card token.
#[derive(Debug, Serialize)]
pub struct TokenSaleRequest {
    amount: String,
    #[serde(rename = "SiteId")]
    site_id: Secret<String>,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "TrackingId")]
    tracking_id: String,
    #[serde(rename = "IsInitialForRecurring")]
    is_initial_for_recurring: &'static str,
    #[serde(rename = "tokenId")]
    token_id: Secret<String>,
}

/// Re-charge against a prior sale. Deliberately carries no site, currency
/// or tracking id; the gateway derives them from the referenced sale.
#[derive(Debug, Serialize)]
pub struct RecurringSaleRequest {
    amount: String,
    #[serde(rename = "SaleTransactionId")]
    sale_transaction_id: String,
    #[serde(rename = "IsInitialForRecurring")]
    is_initial_for_recurring: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CaptureRequest {
    amount: String,
    #[serde(rename = "authorizetransactionid")]
    authorize_transaction_id: String,
}

#[derive(Debug, Serialize)]
pub struct RefundRequest {
    amount: String,
    #[serde(rename = "referencetransactionid")]
    reference_transaction_id: String,
}

#[derive(Debug, Serialize)]
pub struct VoidRequest {
    #[serde(rename = "referencetransactionid")]
    reference_transaction_id: String,
}

/// Stored-card creation. The card number rides under `number` here, unlike
/// the `cardNumber` the sale actions use.
#[derive(Debug, Serialize)]
pub struct TokenizeRequest {
    #[serde(flatten)]
    billing: BillingFields,
    #[serde(flatten)]
    shipping: Option<ShippingFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Secret<String>>,
    number: CardNumber,
    #[serde(rename = "NameOnCard")]
    name_on_card: Secret<String>,
    #[serde(rename = "ExpirationMonth")]
    expiration_month: Secret<String>,
    #[serde(rename = "ExpirationYear")]
    expiration_year: Secret<String>,
    #[serde(rename = "CvvCode")]
    cvv_code: Secret<String>,
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
    action: RestAction,
    request: &T,
) -> CustomResult<ResolvedRequest, ConnectorError> {
    let payload =
        serde_json::to_value(request).change_context(ConnectorError::RequestEncodingFailed)?;
    Ok(ResolvedRequest {
        action: Action::Rest(action),
        payload,
    })
}

/// Routes one operation to its action and maps the parameter set onto the
/// wire shape. Validation failures surface before any payload is built.
pub fn build_request(
    operation: Operation,
    params: &PaymentParams,
) -> CustomResult<ResolvedRequest, ConnectorError> {
    match operation {
        Operation::Purchase => build_sale(params, RestAction::SaleTransactions),
        Operation::Authorize => build_sale(params, RestAction::AuthorizeTransactions),
        Operation::Capture => {
            let request = CaptureRequest {
                amount: required(&params.amount, "amount")?.clone(),
                authorize_transaction_id: required(
                    &params.transaction_reference,
                    "transaction_reference",
                )?
                .clone(),
            };
            encode(RestAction::CaptureTransactions, &request)
        }
        Operation::Refund => {
            let request = RefundRequest {
                amount: required(&params.amount, "amount")?.clone(),
                reference_transaction_id: required(
                    &params.transaction_reference,
                    "transaction_reference",
                )?
                .clone(),
            };
            encode(RestAction::RefundTransactions, &request)
        }
        Operation::Void => {
            let request = VoidRequest {
                reference_transaction_id: required(
                    &params.transaction_reference,
                    "transaction_reference",
                )?
                .clone(),
            };
            encode(RestAction::VoidTransactions, &request)
        }
        Operation::Tokenize => {
            let card = required(&params.card, "card")?;
            card.validate()?;
            let request = TokenizeRequest {
                billing: BillingFields::from(card),
                shipping: card
                    .shipping
                    .as_ref()
                    .map(|shipping| ShippingFields::from_card(card, shipping)),
                email: card.email.clone(),
                number: card.number.clone(),
                name_on_card: card.name_on_card(),
                expiration_month: card.exp_month.clone(),
                expiration_year: card.exp_year.clone(),
                cvv_code: card.cvv.clone(),
            };
            encode(RestAction::CreditCardTokens, &request)
        }
    }
}

/// Sale routing: the funding source picks the action, with a fixed
/// precedence when several are supplied. A recurring re-charge trumps a
/// stored token, which trumps raw card data. Only the raw-card branch
/// differs between purchase and authorization.
fn build_sale(
    params: &PaymentParams,
    card_action: RestAction,
) -> CustomResult<ResolvedRequest, ConnectorError> {
    let amount = required(&params.amount, "amount")?.clone();
    match PaymentMethod::resolve(params)? {
        PaymentMethod::RecurringReference(reference) => {
            let request = RecurringSaleRequest {
                amount,
                sale_transaction_id: reference.to_string(),
                is_initial_for_recurring: consts::NOT_INITIAL_FOR_RECURRING,
            };
            encode(RestAction::RecurringTransactions, &request)
        }
        PaymentMethod::StoredReference(token) => {
            let request = TokenSaleRequest {
                amount,
                site_id: required(&params.site_id, "site_id")?.clone(),
                currency: required(&params.currency, "currency")?.to_uppercase(),
                tracking_id: required(&params.tracking_id, "tracking_id")?.clone(),
                is_initial_for_recurring: consts::INITIAL_FOR_RECURRING,
                token_id: token.clone(),
            };
            encode(RestAction::TokenSaleTransactions, &request)
        }
        PaymentMethod::RawCard(card) => {
            card.validate()?;
            let request = CardSaleRequest {
                amount,
                site_id: required(&params.site_id, "site_id")?.clone(),
                currency: required(&params.currency, "currency")?.to_uppercase(),
                tracking_id: required(&params.tracking_id, "tracking_id")?.clone(),
                is_initial_for_recurring: consts::INITIAL_FOR_RECURRING,
                billing: BillingFields::from(card),
                shipping: card
                    .shipping
                    .as_ref()
                    .map(|shipping| ShippingFields::from_card(card, shipping)),
                ip_address: required(&params.client_ip, "client_ip")?.clone(),
                email: card.email.clone(),
                card_number: card.number.clone(),
                name_on_card: card.name_on_card(),
                expiration_month: card.exp_month.clone(),
                expiration_year: card.exp_year.clone(),
                cvv_code: card.cvv.clone(),
            };
            encode(card_action, &request)
        }
    }
}

/// Reply shape of every JSON action. All fields are optional on the wire;
/// absence stays absence after normalization.
#[derive(Debug, Deserialize)]
pub struct AlliedwalletRestResponse {
    pub status: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "trackingid")]
    pub tracking_id: Option<String>,
    pub message: Option<String>,
}

/// Collapses a reply into the uniform result. Success is strict equality
/// against the gateway's status literal; anything else, including a missing
/// status, is a non-success.
pub fn normalize_response(raw: serde_json::Value) -> CustomResult<GatewayResult, ConnectorError> {
    let response: AlliedwalletRestResponse =
        serde_json::from_value(raw).change_context(ConnectorError::ResponseDeserializationFailed)?;
    let success = response.status.as_deref() == Some(consts::REST_SUCCESS_STATUS);
    tracing::debug!(success, status = ?response.status, "normalized rest reply");
    Ok(GatewayResult {
        success,
        reference: response.id,
        message: response.message,
        code: response.status.map(ResultCode::Rest),
    })
}
