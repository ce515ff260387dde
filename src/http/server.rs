//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway and health handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Pick a backend per request and hand off to the dispatcher

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, ValidationError};
use crate::dispatch::{Dispatcher, ForwardResult};
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::load_balancer::{BackendTable, Selector};
use crate::observability::metrics;

/// Error type for building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub selector: Arc<Selector>,
    pub dispatcher: Dispatcher,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    selector: Arc<Selector>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails fast if a backend URL is unusable.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let backends = Arc::new(BackendTable::from_config(&config.backends)?);
        let dispatcher = Dispatcher::new(
            backends,
            Duration::from_secs(config.timeouts.upstream_secs),
        )?;
        let selector = Arc::new(Selector::new(config.selection.threshold));

        let state = AppState {
            selector: selector.clone(),
            dispatcher,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, selector })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(gateway_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            threshold = self.selector.threshold(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared selector, for inspecting routing state.
    pub fn selector(&self) -> Arc<Selector> {
        self.selector.clone()
    }

    /// The fully layered router, without binding a listener.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Gateway handler.
/// Picks a backend, forwards `choice`, and returns whatever comes back.
async fn gateway_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> ForwardResult {
    let choice = first_param(&params, "choice");

    let backend = state.selector.next();
    metrics::record_decision(backend);

    tracing::info!(
        request_id = %request_id(&headers),
        backend = %backend,
        choice = %choice,
        "Forwarding request"
    );

    state.dispatcher.forward(backend, choice).await
}

/// First value of a query parameter, or `""` when absent.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> &'a str {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

/// Liveness check. Does not touch routing state.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
