//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BffConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::BffConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Check a parsed configuration for values serde cannot reject on its own.
pub fn validate_config(config: &BffConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    match Url::parse(&config.explorer.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "explorer.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "explorer.base_url",
            format!("'{}': {}", config.explorer.base_url, e),
        )),
    }

    if config.explorer.page_size == 0 {
        errors.push(ValidationError::new("explorer.page_size", "must be > 0"));
    }
    if config.explorer.max_pages == 0 {
        errors.push(ValidationError::new("explorer.max_pages", "must be > 0"));
    }
    if config.limits.address_request_limit == 0 {
        errors.push(ValidationError::new(
            "limits.address_request_limit",
            "must be > 0",
        ));
    }
    if config.limits.response_limit == 0 {
        errors.push(ValidationError::new("limits.response_limit", "must be > 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BffConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_limits() {
        let mut config = BffConfig::default();
        config.limits.response_limit = 0;
        config.limits.address_request_limit = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["limits.address_request_limit", "limits.response_limit"]
        );
    }

    #[test]
    fn test_rejects_non_http_explorer() {
        let mut config = BffConfig::default();
        config.explorer.base_url = "ftp://explorer.example".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "explorer.base_url");
        assert!(errors[0].reason.contains("ftp"));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = BffConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
