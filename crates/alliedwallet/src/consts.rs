//! Endpoint locations and wire literals shared by both transports.

/// Live REST endpoint. The API has only one host; test traffic is routed by
/// merchant configuration, not by URL.
pub const REST_BASE_URL: &str = "https://api.alliedwallet.com/";

/// Legacy SOAP merchant service.
pub const SOAP_ENDPOINT: &str = "https://service.381808.com/Merchant.asmx";

/// Appended to the SOAP endpoint to fetch the service description.
pub const SOAP_WSDL_SUFFIX: &str = "?WSDL";

/// Namespace required for all SOAP operations.
pub const SOAP_NAMESPACE: &str = "http://service.381808.com/";

/// Status literal marking a successful REST transaction. Anything else,
/// including an absent status, is a non-success.
pub const REST_SUCCESS_STATUS: &str = "Successful";

/// SOAP state code for a successful transaction. Zero is a legitimate
/// distinct non-success code, not an empty value.
pub const SOAP_SUCCESS_STATUS: i64 = 1;

/// Default SOAP connection/response timeout, in seconds.
pub const SOAP_DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Value of `IsInitialForRecurring` on first-time card and token sales.
pub const INITIAL_FOR_RECURRING: &str = "true";

/// Value of `IsInitialForRecurring` on recurring re-charges.
pub const NOT_INITIAL_FOR_RECURRING: &str = "false";
