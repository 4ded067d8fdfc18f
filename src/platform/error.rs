//! Error types for platform dispatch.

use thiserror::Error;

/// Errors raised when selecting a platform implementation.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// No platform-specific implementation matched and no default was
    /// registered.
    #[error("operation '{operation}' has no implementation for platform '{platform}'")]
    Unimplemented {
        /// Logical operation name.
        operation: String,
        /// The platform identifier that failed to match.
        platform: String,
    },
}
