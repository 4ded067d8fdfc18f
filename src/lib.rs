//! Control-plane client for a Clash-compatible proxy daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                CONTROL CLIENT                  │
//!                    │                                                │
//!   caller           │  ┌─────────┐     ┌───────────────────────┐    │
//!   (CLI, TUI,  ─────┼─▶│   api   │────▶│       transport        │───┼──▶ daemon
//!   scripts)         │  │ routes +│     │ one-shot request  or   │    │    HTTP API
//!                    │  │ client  │     │ keep-alive line stream │    │
//!                    │  └─────────┘     └───────────────────────┘    │
//!                    │                                                │
//!                    │  ┌────────────────────────────────────────┐   │
//!                    │  │          Cross-Cutting Concerns         │   │
//!                    │  │  ┌─────────┐ ┌──────────┐ ┌──────────┐  │   │
//!                    │  │  │ config  │ │ platform │ │observa-  │  │   │
//!                    │  │  │         │ │ dispatch │ │ bility   │  │   │
//!                    │  │  └─────────┘ └──────────┘ └──────────┘  │   │
//!                    │  └────────────────────────────────────────┘   │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! The `api` subsystem turns symbolic operation names into HTTP calls
//! against a fixed route table; `transport` performs them, either as a
//! single exchange or as a lazily pulled line stream. The `platform`
//! subsystem is an independent pick-one-of-N-by-environment registry
//! for OS-specific capabilities.

// Core subsystems
pub mod api;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod platform;

pub use api::{ApiClient, ApiError, ApiResponse, Exchange, Operation};
pub use config::ControlConfig;
pub use platform::{PlatformRegistry, DEFAULT_PLATFORM};
pub use transport::{LineStream, Transport, TransportError};
