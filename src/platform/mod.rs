//! Platform-capability dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     collaborators register implementations
//!         → registry.rs (one dispatcher per operation name)
//!
//! first call:
//!     dispatcher.rs selects exactly one implementation
//!         (exact platform match → longest prefix → default)
//!         → selection cached for the process lifetime
//!
//! later calls:
//!     cached implementation returned without re-resolving
//! ```
//!
//! # Design Decisions
//! - An explicit registry object, constructed at startup and passed by
//!   reference; no module-level mutable state
//! - Longest-prefix-wins makes selection deterministic regardless of
//!   registration order
//! - Generic over the implementation type; usable for any capability,
//!   not just HTTP
//! - Decoupled from the API client

pub mod dispatcher;
pub mod error;
pub mod registry;

pub use dispatcher::{Dispatcher, DEFAULT_PLATFORM};
pub use error::PlatformError;
pub use registry::PlatformRegistry;
