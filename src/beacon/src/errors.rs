/// Error types for the beacon client.
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur talking to a beacon node.
#[derive(Debug)]
pub enum BeaconError {
    /// Error when no endpoint was configured.
    NoConnection,

    /// Error when the endpoint cannot be parsed.
    InvalidEndpoint(String),

    /// Error when the HTTP client cannot be built.
    ClientError(String),

    /// Error when the node cannot be reached or the request times out.
    RequestFailed {
        /// What was being requested
        context: String,
        /// The transport error
        message: String,
    },

    /// Error when the node answers with a non-success status.
    ResponseError {
        /// HTTP status code
        status: u16,
        /// Message returned by the node
        message: String,
    },

    /// Error when a response body cannot be decoded.
    DecodeError(String),

    /// Error when a chain configuration value has an unexpected shape.
    ConfigValueError {
        /// The configuration key
        key: String,
        /// The raw value
        value: String,
        /// Why it was rejected
        message: String,
    },

    /// Error when the node does not know the validator.
    ValidatorNotFound(String),
}

impl fmt::Display for BeaconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeaconError::NoConnection => write!(f, "no connection to beacon node"),
            BeaconError::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {}", msg),
            BeaconError::ClientError(msg) => write!(f, "Client error: {}", msg),
            BeaconError::RequestFailed { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            BeaconError::ResponseError { status, message } => {
                write!(f, "Beacon node returned {}: {}", status, message)
            }
            BeaconError::DecodeError(msg) => write!(f, "Failed to decode response: {}", msg),
            BeaconError::ConfigValueError {
                key,
                value,
                message,
            } => write!(
                f,
                "failed to convert value {:?} for {}: {}",
                value, key, message
            ),
            BeaconError::ValidatorNotFound(key) => write!(f, "Validator not found: {}", key),
        }
    }
}

impl StdError for BeaconError {}
