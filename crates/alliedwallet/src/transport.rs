//! The seam between request building and actual I/O.
//!
//! The adapter owns connections, TLS, SOAP envelope encoding and decoding.
//! This crate hands it a fully resolved call and gets back the reply as a
//! JSON value (for SOAP, the decoded envelope body as a mapping). Whatever
//! goes wrong on the wire collapses to [`TransportUnavailable`]; gateway
//! declines come back as ordinary replies, never as transport errors.

use masking::Secret;

use crate::{
    consts,
    errors::{CustomResult, TransportUnavailable},
};

/// Per-transport connection options, fixed at gateway construction.
#[derive(Debug, Clone)]
pub enum TransportOptions {
    Rest {
        bearer_token: Secret<String>,
        /// The processor refuses older protocol versions.
        require_tls_1_2: bool,
    },
    Soap {
        wsdl_location: String,
        /// Namespace every method is invoked under.
        namespace: String,
        timeout_secs: u64,
    },
}

impl TransportOptions {
    pub fn soap_default(wsdl_location: String) -> Self {
        Self::Soap {
            wsdl_location,
            namespace: consts::SOAP_NAMESPACE.to_string(),
            timeout_secs: consts::SOAP_DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// One resolved exchange: destination, action or method name, payload.
#[derive(Debug, Clone)]
pub struct TransportCall {
    /// Full REST URL, or the SOAP service endpoint.
    pub url: String,
    /// REST action path segment, or the SOAP method to invoke.
    pub action: String,
    pub payload: serde_json::Value,
    pub options: TransportOptions,
}

/// Carries a [`TransportCall`] to the processor and returns the raw reply
/// as JSON. Implementations must make exactly one network exchange per
/// `execute` and must not retry.
pub trait TransportAdapter {
    fn execute(&self, call: &TransportCall) -> CustomResult<serde_json::Value, TransportUnavailable>;
}
