//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ControlConfig (validated, immutable)
//!     → ApiClient / Transport construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a reload by the
//!   caller
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every error, not just the first
//! - The library never reads files on its own; loading is for
//!   consumers such as the CLI

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ApiConfig, ControlConfig, PlatformConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
