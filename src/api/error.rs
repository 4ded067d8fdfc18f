//! Error types for API dispatch.

use thiserror::Error;

use crate::transport::TransportError;

/// Unified error type for API client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The symbolic name does not exist in the route table.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A path placeholder has no matching argument; the request was
    /// never sent.
    #[error("operation '{operation}' is missing path argument '{placeholder}'")]
    MissingArgument {
        /// Symbolic name of the operation.
        operation: &'static str,
        /// Name of the unfilled placeholder.
        placeholder: String,
    },

    /// The configured secret cannot be carried in an HTTP header.
    #[error("secret contains characters not permitted in an Authorization header")]
    InvalidSecret,

    /// A keep-alive operation was invoked through the one-shot entry
    /// point.
    #[error("operation '{0}' is a streaming operation")]
    Streaming(&'static str),

    /// A one-shot operation was invoked through the streaming entry
    /// point.
    #[error("operation '{0}' is not a streaming operation")]
    NotStreaming(&'static str),

    /// The network exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
