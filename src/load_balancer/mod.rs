//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → round_robin.rs (Selector picks blue or green, advances counter)
//!     → backend.rs (BackendTable resolves the base URL)
//!     → dispatch layer performs the outbound call
//! ```
//!
//! # Design Decisions
//! - Selection ignores backend health, latency and request content
//! - The counter advances exactly once per request, before forwarding
//! - Backend URLs are validated once at startup, never per request

pub mod backend;
pub mod round_robin;

pub use backend::{BackendId, BackendTable};
pub use round_robin::Selector;
