//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream origin.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";
/// Fallback name used by the original web deployment.
pub const LEGACY_BACKEND_URL_ENV: &str = "NEXT_PUBLIC_BACKEND_URL";
pub const BIND_ADDRESS_ENV: &str = "GATEWAY_BIND_ADDRESS";
pub const LOG_LEVEL_ENV: &str = "GATEWAY_LOG_LEVEL";

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

/// Load configuration: optional TOML file, then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => GatewayConfig::default(),
    };

    let config = apply_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document without validating it.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_overrides<F>(mut config: GatewayConfig, lookup: F) -> GatewayConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(origin) = non_empty(BACKEND_URL_ENV).or_else(|| non_empty(LEGACY_BACKEND_URL_ENV)) {
        config.upstream.origin = origin;
    }
    if let Some(addr) = non_empty(BIND_ADDRESS_ENV) {
        config.listener.bind_address = addr;
    }
    if let Some(level) = non_empty(LOG_LEVEL_ENV) {
        config.observability.log_level = level;
    }

    config
}
