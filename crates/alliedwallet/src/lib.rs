//! Client adapter for the AlliedWallet payment gateway.
//!
//! Translates the usual gateway operations (purchase, authorize, capture,
//! refund, void, stored-card creation) into the processor's two wire
//! dialects: the JSON interface at `api.alliedwallet.com` and the legacy
//! SOAP merchant service. The adapter owns request building, action and
//! method routing, field mapping, and normalization of replies into one
//! uniform [`GatewayResult`]; the actual I/O sits behind the
//! [`TransportAdapter`] seam.
//!
//! ```no_run
//! use alliedwallet::{
//!     AlliedwalletAuthType, ConnectorParams, CustomResult, Gateway, GatewayError,
//!     PaymentParams, TransportAdapter,
//! };
//! use masking::Secret;
//!
//! fn charge<T: TransportAdapter>(transport: T) -> CustomResult<(), GatewayError> {
//!     let gateway = Gateway::new(
//!         ConnectorParams::default(),
//!         AlliedwalletAuthType::Rest {
//!             merchant_id: Secret::new("merchant-guid".to_string()),
//!             oauth_token: Secret::new("oauth-token".to_string()),
//!         },
//!         transport,
//!     );
//!     let result = gateway.purchase(&PaymentParams {
//!         amount: Some("12.00".to_string()),
//!         // currency, site id, tracking id, card, client ip ...
//!         ..Default::default()
//!     })?;
//!     assert!(result.success);
//!     Ok(())
//! }
//! ```

pub mod card;
pub mod configs;
pub mod consts;
pub mod errors;
pub mod gateway;
pub mod rest;
pub mod soap;
pub mod transport;
pub mod types;

pub use self::{
    card::{Address, Card, CardNumber},
    configs::{AlliedwalletAuthType, ConnectorParams},
    errors::{ConnectorError, CustomResult, GatewayError, TransportUnavailable},
    gateway::Gateway,
    rest::Alliedwallet,
    soap::AlliedwalletSoap,
    transport::{TransportAdapter, TransportCall, TransportOptions},
    types::{
        Action, GatewayResult, Operation, PaymentParams, ResolvedRequest, RestAction, ResultCode,
        SoapMethod, Transport,
    },
};
