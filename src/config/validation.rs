//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//!
//! Returns all validation errors, not just the first.

use std::str::FromStr;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.user_service.host.trim().is_empty() {
        errors.push(ValidationError::new("user_service.host", "must not be empty"));
    }
    if config.user_service.port.parse::<u16>().is_err() {
        errors.push(ValidationError::new(
            "user_service.port",
            format!("{:?} is not a valid port", config.user_service.port),
        ));
    }
    if config.user_service.connect_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "user_service.connect_timeout_ms",
            "must be greater than zero",
        ));
    }
    if config.user_service.rpc_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "user_service.rpc_timeout_ms",
            "must be greater than zero",
        ));
    }

    let port = config
        .http_port
        .rsplit_once(':')
        .map(|(_, port)| port)
        .unwrap_or(&config.http_port);
    if port.parse::<u16>().is_err() {
        errors.push(ValidationError::new(
            "http_port",
            format!("{:?} is not a valid listen address", config.http_port),
        ));
    }

    if tracing::Level::from_str(&config.log_level).is_err() {
        errors.push(ValidationError::new(
            "log_level",
            format!("unknown level {:?}", config.log_level),
        ));
    }

    if config.http.body_limit_bytes == 0 {
        errors.push(ValidationError::new(
            "http.body_limit_bytes",
            "must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
