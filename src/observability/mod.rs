//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout/stderr, shaped by RUST_LOG
//! ```
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - Request dispatch logged at debug, stream lifecycle at trace
//! - No metrics endpoint; this is a client library, not a service

pub mod logging;
