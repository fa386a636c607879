//! Error taxonomy for the adapter.
//!
//! Three failure kinds are kept strictly apart: request validation errors
//! (raised before any transport call), transport unavailability (opaque,
//! owned by the transport collaborator), and malformed replies. A gateway
//! decline is not an error; it is a normal [`GatewayResult`] with
//! `success == false`.
//!
//! [`GatewayResult`]: crate::types::GatewayResult

/// Shorthand for a result carrying an [`error_stack::Report`].
pub type CustomResult<T, E> = Result<T, error_stack::Report<E>>;

/// Errors raised while building a request or normalizing a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectorError {
    /// A field the selected operation/routing branch requires was not
    /// supplied in the parameter set.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },

    /// A supplied field failed structural validation.
    #[error("Invalid data format for field: {field_name}")]
    InvalidDataFormat { field_name: &'static str },

    /// The operation exists but the selected transport cannot carry it.
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: &'static str,
        connector: &'static str,
    },

    /// The request payload could not be encoded.
    #[error("Failed to encode request payload")]
    RequestEncodingFailed,

    /// The reply could not be parsed into the expected shape. Missing
    /// optional fields never trigger this; only a structurally wrong reply
    /// does (e.g. an absent SOAP result name).
    #[error("Failed to deserialize gateway response")]
    ResponseDeserializationFailed,
}

/// The single failure kind a transport adapter may surface: connection
/// refused, timeout, undecodable body. Deliberately carries no gateway
/// semantics so it can never be confused with a decline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("gateway transport unavailable")]
pub struct TransportUnavailable;

/// Caller-facing failure taxonomy of the gateway facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Request validation or routing failed; no transport call was made.
    #[error("request validation failed before dispatch")]
    InvalidRequest,

    /// The transport collaborator could not complete the exchange.
    #[error("gateway transport unavailable")]
    TransportUnavailable,

    /// The gateway replied, but the reply could not be unwrapped or parsed.
    #[error("gateway reply could not be parsed")]
    MalformedReply,
}
