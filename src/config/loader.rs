//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `upstream.base_url`.
pub const ENV_BASE_URL: &str = "BASE_URL";
/// Environment variable overriding `cors.allowed_origin`.
pub const ENV_ALLOWED_ORIGIN: &str = "ALLOWED_ORIGIN";
/// Environment variable overriding `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
/// Environment variable overriding `observability.log_level`.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Overlay settings found through `lookup` onto `config`.
///
/// Unset and empty variables leave the current value alone.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = get(ENV_BASE_URL) {
        config.upstream.base_url = base_url;
    }
    if let Some(origin) = get(ENV_ALLOWED_ORIGIN) {
        config.cors.allowed_origin = Some(origin.trim().to_string());
    }
    if let Some(bind_address) = get(ENV_BIND_ADDRESS) {
        config.listener.bind_address = bind_address;
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
}

/// Load the process configuration.
///
/// Order: TOML file (or defaults) → `.env` file → process environment →
/// validation. Any validation failure is returned and is fatal at startup.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ProxyConfig::default(),
    };

    // Missing .env is normal outside development.
    let dotenv = dotenvy::dotenv().ok();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(config_file = ?path, dotenv = ?dotenv, "Configuration loaded");

    Ok(config)
}
