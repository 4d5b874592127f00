//! Error types for fusiontables-link.
//!
//! Construction and query-building failures are returned before any request
//! is made. Everything that happens on the wire resolves the operation's
//! future with one of the transport or response variants.

use thiserror::Error;

/// Result type for fusiontables-link operations
pub type Result<T> = std::result::Result<T, FusionTablesError>;

/// Errors that can occur while building or executing a table request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionTablesError {
    /// Bad or missing client options
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Malformed WHERE or LIMIT input
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A single-row lookup was attempted without a where clause
    #[error("The where clause is required when fetching a single row")]
    MissingWhereClause,

    /// The server answered with a different payload shape than requested
    #[error("Expected {expected} response. {actual} returned instead.")]
    UnexpectedResponseKind { expected: String, actual: String },

    /// No response arrived within the configured timeout
    #[error("Timeout: {0}")]
    TransportTimeout(String),

    /// Connection failure or non-success status on the direct transport
    #[error("Network error: {0}")]
    TransportNetwork(String),

    /// Non-success HTTP status on the server transport
    #[error("Server error ({status_code}): {message}")]
    ServerError { status_code: u16, message: String },

    /// Response body was not valid JSON or had the wrong structure
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A value could not be converted while parsing a response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A write operation was routed through the read-only binding
    #[error("Read-only: {0}")]
    ReadOnly(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl FusionTablesError {
    /// True for failures raised by a transport rather than by the caller's input
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout(_) | Self::TransportNetwork(_) | Self::ServerError { .. }
        )
    }
}

impl From<serde_json::Error> for FusionTablesError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for FusionTablesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TransportTimeout(err.to_string())
        } else if err.is_decode() {
            Self::SerializationError(err.to_string())
        } else {
            Self::TransportNetwork(err.to_string())
        }
    }
}
