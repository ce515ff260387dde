//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! BackendId + choice from the endpoint
//!     → forwarder.rs (build URL, GET with deadline)
//!     → Ok: backend JSON body + status, unchanged
//!     → Err: result.rs maps to {"error": ...} + 503, logged once
//! ```
//!
//! # Design Decisions
//! - Exactly one attempt per request: no retries, no circuit breaking
//! - Failures stop here; the endpoint only ever sees a `ForwardResult`
//! - Full response body is buffered before returning

pub mod forwarder;
pub mod result;

pub use forwarder::Dispatcher;
pub use result::{DispatchError, ForwardResult};
