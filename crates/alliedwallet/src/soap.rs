//! Legacy SOAP connector: method routing and the envelope-unwrapping entry
//! for SOAP-bound operations.

pub mod transformers;

use masking::Secret;

use crate::{
    configs::ConnectorParams,
    errors::{ConnectorError, CustomResult},
    transport::{TransportCall, TransportOptions},
    types::{Action, GatewayResult, Operation, PaymentParams, ResolvedRequest, SoapMethod},
};

/// The SOAP connector. The legacy interface authenticates by merchant id
/// inside each payload; there is no separate credential header.
#[derive(Debug, Clone)]
pub struct AlliedwalletSoap {
    params: ConnectorParams,
    merchant_id: Secret<String>,
}

impl AlliedwalletSoap {
    pub fn new(params: ConnectorParams, merchant_id: Secret<String>) -> Self {
        Self {
            params,
            merchant_id,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.params.soap_endpoint
    }

    pub fn build_request(
        &self,
        operation: Operation,
        params: &PaymentParams,
    ) -> CustomResult<ResolvedRequest, ConnectorError> {
        transformers::build_request(operation, params, &self.merchant_id)
    }

    /// The reply envelope is keyed by the per-method result name, so the
    /// normalizer needs to know which method was called.
    pub fn normalize_response(
        &self,
        method: SoapMethod,
        raw: serde_json::Value,
    ) -> CustomResult<GatewayResult, ConnectorError> {
        transformers::normalize_response(method, raw)
    }

    pub fn transport_call(
        &self,
        request: &ResolvedRequest,
    ) -> CustomResult<TransportCall, ConnectorError> {
        let Action::Soap(method) = request.action else {
            return Err(ConnectorError::RequestEncodingFailed.into());
        };
        Ok(TransportCall {
            url: self.params.soap_endpoint.clone(),
            action: method.name().to_string(),
            payload: request.payload.clone(),
            options: TransportOptions::soap_default(self.params.wsdl_location()),
        })
    }
}
