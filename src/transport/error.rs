//! Error types for transport operations.

use thiserror::Error;

/// Unified error type for transport exchanges.
///
/// HTTP-level error statuses never map here; a 404 is a normal
/// `(status, body)` result.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established or the request failed in
    /// flight.
    #[error("connection failed: {0}")]
    Connect(reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),

    /// The response body is not valid UTF-8.
    #[error("response is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The exchange or stream pull exceeded its deadline.
    #[error("timed out waiting for the daemon")]
    Timeout,
}

impl TransportError {
    /// Classify a send-phase failure.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Connect(err)
        }
    }

    /// Classify a body-read failure.
    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Body(err)
        }
    }
}
