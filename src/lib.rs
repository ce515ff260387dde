//! Blue/green traffic gateway library.
//!
//! Splits requests between two backends in fixed runs of `threshold`
//! requests and forwards each request's `choice` parameter to the selected
//! backend. Unreachable backends produce a 503 JSON error, never a crash.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use dispatch::{Dispatcher, ForwardResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use load_balancer::{BackendId, BackendTable, Selector};
