//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL is a usable http(s) endpoint
//! - Check the secret can travel in an HTTP header
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ControlConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::ControlConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub enum ValidationError {
    /// The base URL does not parse as a URL.
    InvalidBaseUrl(String),
    /// The base URL uses a scheme other than http or https.
    UnsupportedScheme(String),
    /// The base URL has no host.
    MissingHost(String),
    /// The secret contains characters that cannot appear in a header.
    UnusableSecret,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBaseUrl(url) => {
                write!(f, "base_url '{}' is not a valid URL", url)
            }
            ValidationError::UnsupportedScheme(scheme) => {
                write!(f, "base_url scheme '{}' is not http or https", scheme)
            }
            ValidationError::MissingHost(url) => {
                write!(f, "base_url '{}' has no host", url)
            }
            ValidationError::UnusableSecret => {
                write!(f, "secret contains characters not permitted in a header")
            }
        }
    }
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ControlConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme(url.scheme().to_owned()));
            }
            if url.host_str().is_none() {
                errors.push(ValidationError::MissingHost(config.api.base_url.clone()));
            }
        }
        Err(_) => errors.push(ValidationError::InvalidBaseUrl(config.api.base_url.clone())),
    }

    if let Some(secret) = &config.api.secret {
        if secret.chars().any(|c| c.is_ascii_control() || !c.is_ascii()) {
            errors.push(ValidationError::UnusableSecret);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
