//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → gateway handler (Selector picks backend)
//!     → dispatch layer (outbound call)
//!     → response.rs (JSON body + status, backend header)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::X_GATEWAY_BACKEND;
pub use server::{AppState, HttpServer, ServerError};
