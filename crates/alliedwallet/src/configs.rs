//! Connector configuration and credentials.

use masking::Secret;
use serde::Deserialize;

use crate::consts;

/// Endpoint configuration for both transports. Defaults point at the live
/// service; integration environments override these wholesale.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectorParams {
    /// REST base, with trailing slash. The merchant-scoped path and action
    /// segment are appended per call.
    pub base_url: String,
    /// SOAP merchant service location, without the WSDL suffix.
    pub soap_endpoint: String,
}

impl Default for ConnectorParams {
    fn default() -> Self {
        Self {
            base_url: consts::REST_BASE_URL.to_string(),
            soap_endpoint: consts::SOAP_ENDPOINT.to_string(),
        }
    }
}

impl ConnectorParams {
    /// Location of the SOAP service description.
    pub fn wsdl_location(&self) -> String {
        format!("{}{}", self.soap_endpoint, consts::SOAP_WSDL_SUFFIX)
    }
}

/// Gateway credentials. The variant also selects the transport: the REST
/// interface authenticates with an OAuth bearer token, the legacy SOAP
/// interface is identified by merchant id alone (both ids are 36-character
/// GUIDs assigned by the gateway).
#[derive(Debug, Clone)]
pub enum AlliedwalletAuthType {
    Rest {
        merchant_id: Secret<String>,
        oauth_token: Secret<String>,
    },
    Soap {
        merchant_id: Secret<String>,
    },
}
