//! Gateway facade: one call per operation, built then executed exactly
//! once, then normalized. No retries at this layer.

use error_stack::ResultExt;

use crate::{
    configs::{AlliedwalletAuthType, ConnectorParams},
    errors::{CustomResult, GatewayError},
    rest::Alliedwallet,
    soap::AlliedwalletSoap,
    transport::TransportAdapter,
    types::{Action, GatewayResult, Operation, PaymentParams, Transport},
};

enum Connector {
    Rest(Alliedwallet),
    Soap(AlliedwalletSoap),
}

/// Caller-facing entry point. The credential variant picks the transport;
/// a gateway instance speaks exactly one of them for its lifetime.
pub struct Gateway<T> {
    connector: Connector,
    transport: T,
}

impl<T: TransportAdapter> Gateway<T> {
    pub fn new(params: ConnectorParams, auth: AlliedwalletAuthType, transport: T) -> Self {
        let connector = match auth {
            AlliedwalletAuthType::Rest {
                merchant_id,
                oauth_token,
            } => Connector::Rest(Alliedwallet::new(params, merchant_id, oauth_token)),
            AlliedwalletAuthType::Soap { merchant_id } => {
                Connector::Soap(AlliedwalletSoap::new(params, merchant_id))
            }
        };
        Self {
            connector,
            transport,
        }
    }

    pub fn transport_kind(&self) -> Transport {
        match self.connector {
            Connector::Rest(_) => Transport::Rest,
            Connector::Soap(_) => Transport::Soap,
        }
    }

    pub fn purchase(&self, params: &PaymentParams) -> CustomResult<GatewayResult, GatewayError> {
        self.send(Operation::Purchase, params)
    }

    pub fn authorize(&self, params: &PaymentParams) -> CustomResult<GatewayResult, GatewayError> {
        self.send(Operation::Authorize, params)
    }

    pub fn capture(&self, params: &PaymentParams) -> CustomResult<GatewayResult, GatewayError> {
        self.send(Operation::Capture, params)
    }

    pub fn refund(&self, params: &PaymentParams) -> CustomResult<GatewayResult, GatewayError> {
        self.send(Operation::Refund, params)
    }

    pub fn void(&self, params: &PaymentParams) -> CustomResult<GatewayResult, GatewayError> {
        self.send(Operation::Void, params)
    }

    pub fn create_card(&self, params: &PaymentParams) -> CustomResult<GatewayResult, GatewayError> {
        self.send(Operation::Tokenize, params)
    }

    /// Build, execute once, normalize. Validation and routing failures
    /// never reach the transport; a transport failure is never mistaken
    /// for a decline, and a decline is an `Ok` with `success == false`.
    fn send(
        &self,
        operation: Operation,
        params: &PaymentParams,
    ) -> CustomResult<GatewayResult, GatewayError> {
        tracing::info!(%operation, transport = %self.transport_kind(), "dispatching");
        match &self.connector {
            Connector::Rest(connector) => {
                let request = connector
                    .build_request(operation, params)
                    .change_context(GatewayError::InvalidRequest)?;
                let call = connector
                    .transport_call(&request)
                    .change_context(GatewayError::InvalidRequest)?;
                let raw = self
                    .transport
                    .execute(&call)
                    .change_context(GatewayError::TransportUnavailable)?;
                connector
                    .normalize_response(raw)
                    .change_context(GatewayError::MalformedReply)
            }
            Connector::Soap(connector) => {
                let request = connector
                    .build_request(operation, params)
                    .change_context(GatewayError::InvalidRequest)?;
                let Action::Soap(method) = request.action else {
                    return Err(GatewayError::InvalidRequest.into());
                };
                let call = connector
                    .transport_call(&request)
                    .change_context(GatewayError::InvalidRequest)?;
                let raw = self
                    .transport
                    .execute(&call)
                    .change_context(GatewayError::TransportUnavailable)?;
                connector
                    .normalize_response(method, raw)
                    .change_context(GatewayError::MalformedReply)
            }
        }
    }
}
