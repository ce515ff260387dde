//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check backend URLs are absolute http(s) URLs
//! - Validate value ranges (threshold > 0, timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::GatewayConfig;
use crate::load_balancer::backend::{parse_base_url, BackendId};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backend {backend}: invalid base URL {url:?}: {reason}")]
    InvalidBackendUrl {
        backend: BackendId,
        url: String,
        reason: String,
    },

    #[error("selection.threshold must be at least 1")]
    ZeroThreshold,

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error(
        "timeouts.request_secs ({request_secs}) must exceed timeouts.upstream_secs ({upstream_secs})"
    )]
    RequestTimeoutNotAboveUpstream {
        request_secs: u64,
        upstream_secs: u64,
    },

    #[error("observability.resource_interval_secs must be greater than zero")]
    ZeroResourceInterval,

    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("observability.log_level: invalid filter {0:?}")]
    InvalidLogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for id in BackendId::ALL {
        if let Err(e) = parse_base_url(id, config.backends.url_for(id)) {
            errors.push(e);
        }
    }

    if config.selection.threshold == 0 {
        errors.push(ValidationError::ZeroThreshold);
    }

    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.upstream_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
    }
    // The inbound deadline must outlast the outbound one, or the client gets a
    // bare 408 instead of the dispatcher's JSON 503.
    let timeouts = &config.timeouts;
    if timeouts.upstream_secs > 0 && timeouts.request_secs <= timeouts.upstream_secs {
        errors.push(ValidationError::RequestTimeoutNotAboveUpstream {
            request_secs: timeouts.request_secs,
            upstream_secs: timeouts.upstream_secs,
        });
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
        if config.observability.resource_interval_secs == 0 {
            errors.push(ValidationError::ZeroResourceInterval);
        }
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
