//! Registry of dispatchers, one per logical operation.
//!
//! # Responsibilities
//! - Own the current platform identifier
//! - Create dispatchers lazily as operations are registered
//! - Route resolution requests to the right dispatcher
//!
//! # Design Decisions
//! - Constructed once at startup and passed by reference to whatever
//!   registers or resolves; lives for the process lifetime
//! - The platform identifier defaults to `std::env::consts::OS` and can
//!   be overridden for tests or configuration

use std::collections::HashMap;

use crate::platform::dispatcher::Dispatcher;
use crate::platform::error::PlatformError;

/// Registry mapping operation names to platform dispatchers.
#[derive(Debug)]
pub struct PlatformRegistry<T> {
    platform: String,
    dispatchers: HashMap<String, Dispatcher<T>>,
}

impl<T> PlatformRegistry<T> {
    /// Create a registry keyed to the running operating system.
    pub fn new() -> Self {
        Self::with_platform(std::env::consts::OS)
    }

    /// Create a registry with an explicit platform identifier.
    pub fn with_platform(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            dispatchers: HashMap::new(),
        }
    }

    /// The platform identifier used for every resolution.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Register an implementation of `operation` for a platform key
    /// (or [`DEFAULT_PLATFORM`](crate::platform::DEFAULT_PLATFORM)).
    pub fn register(&mut self, operation: &str, platform: &str, implementation: T) {
        self.dispatchers
            .entry(operation.to_owned())
            .or_insert_with(|| Dispatcher::new(operation))
            .register(platform, implementation);
    }

    /// Resolve the implementation of `operation` for this process.
    ///
    /// The first call per operation decides; later calls return the
    /// cached choice.
    pub fn resolve(&self, operation: &str) -> Result<&T, PlatformError> {
        let dispatcher =
            self.dispatchers
                .get(operation)
                .ok_or_else(|| PlatformError::Unimplemented {
                    operation: operation.to_owned(),
                    platform: self.platform.clone(),
                })?;
        dispatcher.resolve(&self.platform)
    }

    /// Access the dispatcher for an operation, if any registration
    /// created one.
    pub fn dispatcher(&self, operation: &str) -> Option<&Dispatcher<T>> {
        self.dispatchers.get(operation)
    }
}

impl<T> Default for PlatformRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
