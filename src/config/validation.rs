//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: FakenodoConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::FakenodoConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub enum ValidationError {
    InvalidBindAddress(String),
    EmptyStorePath,
    InvalidProbeUrl(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address is not a socket address: {}", addr)
            }
            ValidationError::EmptyStorePath => write!(f, "store.path must not be empty"),
            ValidationError::InvalidProbeUrl(url) => {
                write!(f, "probe.base_url is not a valid URL: {}", url)
            }
        }
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &FakenodoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.store.path.trim().is_empty() {
        errors.push(ValidationError::EmptyStorePath);
    }

    if Url::parse(&config.probe.base_url).is_err() {
        errors.push(ValidationError::InvalidProbeUrl(config.probe.base_url.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
