//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Enforce required settings (allowed origin)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ALLOWED_ORIGIN is not set")]
    MissingAllowedOrigin,

    #[error("allowed origin '{0}' must be a bare host without scheme or path")]
    InvalidAllowedOrigin(String),

    #[error("invalid upstream base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request_secs}) must exceed upstream.timeout_secs ({upstream_secs})")]
    RequestDeadlineTooShort { request_secs: u64, upstream_secs: u64 },

    #[error("no upstream resources configured")]
    NoResources,

    #[error("invalid resource name '{0}'")]
    InvalidResource(String),
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.cors.allowed_origin.as_deref().map(str::trim) {
        None | Some("") => errors.push(ValidationError::MissingAllowedOrigin),
        Some(origin) if origin.contains("://") || origin.contains('/') => {
            errors.push(ValidationError::InvalidAllowedOrigin(origin.to_string()))
        }
        Some(_) => {}
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.upstream.base_url.clone())),
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    } else if config.timeouts.request_secs <= config.upstream.timeout_secs {
        // The upstream deadline has to fire first so its error reaches the client.
        errors.push(ValidationError::RequestDeadlineTooShort {
            request_secs: config.timeouts.request_secs,
            upstream_secs: config.upstream.timeout_secs,
        });
    }

    if config.upstream.resources.is_empty() {
        errors.push(ValidationError::NoResources);
    }
    for resource in &config.upstream.resources {
        let valid = !resource.is_empty()
            && resource
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            errors.push(ValidationError::InvalidResource(resource.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
