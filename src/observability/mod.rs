//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling and dispatch produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → resources.rs (periodic CPU/memory gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through handler log lines
//! - Metrics are cheap and disabled by default

pub mod logging;
pub mod metrics;
pub mod resources;

pub use logging::init_logging;
