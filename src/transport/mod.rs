//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! ApiClient
//!     → request.rs (one-shot exchange: send, read full body, decode)
//!     → stream.rs  (keep-alive exchange: send, pull lines lazily)
//!     → daemon HTTP endpoint
//! ```
//!
//! # Design Decisions
//! - Exactly one network exchange per call; no retries, no caching
//! - HTTP error statuses (4xx/5xx) are results, not errors; the caller
//!   interprets them
//! - One-shot calls carry a total deadline; streams are bounded per pull,
//!   never in total (a total deadline would kill a healthy stream)
//! - Bodies are strict UTF-8; decode failure is a transport error

pub mod error;
pub mod request;
pub mod stream;

pub use error::TransportError;
pub use request::Transport;
pub use stream::LineStream;
