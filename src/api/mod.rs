//! Declarative API dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! caller (CLI, TUI, scripts)
//!     → client.rs (resolve operation, substitute path arguments,
//!                  attach auth headers)
//!     → transport (one-shot request or keep-alive line stream,
//!                  chosen by the operation's keep-alive flag)
//!     → daemon HTTP endpoint
//! ```
//!
//! # Design Decisions
//! - The route table is a closed enumeration, fixed at compile time;
//!   an unknown name fails fast, never a silent no-op
//! - Bindings are re-derived on every call; nothing is cached
//! - Payloads pass through as raw text/lines; interpretation belongs to
//!   the caller

pub mod client;
pub mod error;
pub mod routes;

pub use client::{ApiClient, ApiResponse, Exchange};
pub use error::ApiError;
pub use routes::{render_path, Operation, PathArgs};
