//! Outbound forwarding to the selected backend.
//!
//! # Responsibilities
//! - Build the target URL from the backend table
//! - Issue one GET with a hard deadline
//! - Convert every transport failure into a 503 `ForwardResult`

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::dispatch::result::{DispatchError, ForwardResult};
use crate::load_balancer::{BackendId, BackendTable};
use crate::observability::metrics;

/// Forwards requests to backends over a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    backends: Arc<BackendTable>,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher whose outbound calls give up after `timeout`.
    pub fn new(backends: Arc<BackendTable>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            backends,
            timeout,
        })
    }

    /// Forward `choice` to `backend`.
    ///
    /// Never fails: an unreachable backend yields a 503 result.
    pub async fn forward(&self, backend: BackendId, choice: &str) -> ForwardResult {
        let start = Instant::now();

        let result = match self.call(backend, choice).await {
            Ok((status, body)) => ForwardResult::passthrough(backend, status, body),
            Err(e) => {
                tracing::error!(
                    backend = %backend,
                    url = %self.backends.base_url(backend),
                    error = %e,
                    "Error forwarding request"
                );
                metrics::record_failure(backend);
                ForwardResult::unavailable(backend, &e)
            }
        };

        metrics::record_forward(backend, result.status.as_u16(), start);
        result
    }

    async fn call(
        &self,
        backend: BackendId,
        choice: &str,
    ) -> Result<(axum::http::StatusCode, Value), DispatchError> {
        let url = self.backends.target_url(backend, choice);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e, DispatchError::Transport))?;

        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| self.classify(e, DispatchError::Decode))?;

        tracing::debug!(
            backend = %backend,
            status = status.as_u16(),
            "Backend responded"
        );
        Ok((status, body))
    }

    fn classify(
        &self,
        error: reqwest::Error,
        otherwise: fn(reqwest::Error) -> DispatchError,
    ) -> DispatchError {
        if error.is_timeout() {
            DispatchError::Timeout(self.timeout)
        } else {
            otherwise(error)
        }
    }
}
