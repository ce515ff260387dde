//! Outcome of forwarding one request.

use std::error::Error as StdError;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::load_balancer::BackendId;

/// Transport-level failure talking to a backend.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("{}", error_chain(.0))]
    Transport(#[source] reqwest::Error),

    #[error("malformed response body: {}", error_chain(.0))]
    Decode(#[source] reqwest::Error),
}

/// Render an error and its sources as `outer: inner: root`.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Response payload and status for the inbound caller.
///
/// Either a backend's own body and status, or an `{"error": ..}` body with 503.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResult {
    /// Backend the request was routed to.
    pub backend: BackendId,
    pub status: StatusCode,
    pub body: Value,
    /// Set when the backend could not be reached or answered garbage.
    pub degraded: bool,
}

impl ForwardResult {
    /// Backend response passed through unchanged.
    pub fn passthrough(backend: BackendId, status: StatusCode, body: Value) -> Self {
        Self {
            backend,
            status,
            body,
            degraded: false,
        }
    }

    /// 503 with an error body naming the backend and the failure.
    pub fn unavailable(backend: BackendId, error: &DispatchError) -> Self {
        Self {
            backend,
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: json!({ "error": format!("Service unavailable ({backend}): {error}") }),
            degraded: true,
        }
    }
}
