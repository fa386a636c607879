//! JSON interface connector: merchant-scoped URL building, headers, and
//! the routing entry for REST-bound operations.

pub mod transformers;

use error_stack::ResultExt;
use masking::{PeekInterface, Secret};
use url::Url;

use crate::{
    configs::ConnectorParams,
    errors::{ConnectorError, CustomResult},
    transport::{TransportCall, TransportOptions},
    types::{Action, GatewayResult, Operation, PaymentParams, ResolvedRequest, RestAction},
};

/// The REST connector. Owns the endpoint configuration and the merchant's
/// OAuth credentials; everything wire-shaped lives in [`transformers`].
#[derive(Debug, Clone)]
pub struct Alliedwallet {
    params: ConnectorParams,
    merchant_id: Secret<String>,
    oauth_token: Secret<String>,
}

impl Alliedwallet {
    pub fn new(
        params: ConnectorParams,
        merchant_id: Secret<String>,
        oauth_token: Secret<String>,
    ) -> Self {
        Self {
            params,
            merchant_id,
            oauth_token,
        }
    }

    /// `{base}/merchants/{merchantId}/{action}`.
    pub fn url(&self, action: RestAction) -> CustomResult<String, ConnectorError> {
        let base = Url::parse(&self.params.base_url).change_context(
            ConnectorError::InvalidDataFormat {
                field_name: "base_url",
            },
        )?;
        let url = base
            .join(&format!(
                "merchants/{}/{}",
                self.merchant_id.peek(),
                action.path()
            ))
            .change_context(ConnectorError::InvalidDataFormat {
                field_name: "base_url",
            })?;
        Ok(url.to_string())
    }

    /// Fixed header set for every JSON call.
    pub fn headers(&self) -> Vec<(&'static str, Secret<String>)> {
        vec![
            (
                "Authorization",
                Secret::new(format!("Bearer {}", self.oauth_token.peek())),
            ),
            ("Content-type", Secret::new("application/json".to_string())),
            ("Accept", Secret::new("application/json".to_string())),
        ]
    }

    pub fn build_request(
        &self,
        operation: Operation,
        params: &PaymentParams,
    ) -> CustomResult<ResolvedRequest, ConnectorError> {
        transformers::build_request(operation, params)
    }

    pub fn normalize_response(
        &self,
        raw: serde_json::Value,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        transformers::normalize_response(raw)
    }

    /// Resolves a built request into a transport call. The processor
    /// refuses pre-1.2 TLS, so the option is always on.
    pub fn transport_call(
        &self,
        request: &ResolvedRequest,
    ) -> CustomResult<TransportCall, ConnectorError> {
        let Action::Rest(action) = request.action else {
            return Err(ConnectorError::RequestEncodingFailed.into());
        };
        Ok(TransportCall {
            url: self.url(action)?,
            action: action.path().to_string(),
            payload: request.payload.clone(),
            options: TransportOptions::Rest {
                bearer_token: self.oauth_token.clone(),
                require_tls_1_2: true,
            },
        })
    }
}
