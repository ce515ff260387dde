//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Blue backend base URL.
pub const ENV_BLUE_URL: &str = "SERVICE_BLUE_URL";
/// Green backend base URL.
pub const ENV_GREEN_URL: &str = "SERVICE_GREEN_URL";
/// Listener bind address.
pub const ENV_BIND_ADDRESS: &str = "GATEWAY_BIND_ADDRESS";
/// Outbound call deadline in seconds.
pub const ENV_UPSTREAM_TIMEOUT: &str = "GATEWAY_UPSTREAM_TIMEOUT_SECS";
/// Log level filter.
pub const ENV_LOG_LEVEL: &str = "GATEWAY_LOG_LEVEL";
/// Log output format (`pretty` or `json`).
pub const ENV_LOG_FORMAT: &str = "GATEWAY_LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },

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

/// Parse a configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load the gateway configuration.
///
/// Starts from the TOML file at `path` when given (defaults otherwise), layers
/// the process environment on top, then validates the result.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overwrite configuration fields from environment variables that are set.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BLUE_URL) {
        config.backends.blue_url = url;
    }
    if let Some(url) = lookup(ENV_GREEN_URL) {
        config.backends.green_url = url;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
    if let Some(raw) = lookup(ENV_UPSTREAM_TIMEOUT) {
        config.timeouts.upstream_secs = raw.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_UPSTREAM_TIMEOUT,
            value: raw.clone(),
        })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
    if let Some(raw) = lookup(ENV_LOG_FORMAT) {
        config.observability.log_format = match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::Env {
                    var: ENV_LOG_FORMAT,
                    value: raw,
                })
            }
        };
    }
    Ok(())
}
