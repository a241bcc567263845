//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, route table)
//!     → middleware/cors.rs (cross-origin headers, preflight short-circuit)
//!     → middleware/capabilities.rs (what the response writer can do)
//!     → request.rs (peer address, snapshot extraction)
//!     → generators (reflection and synthetic responses)
//!     → response.rs (JSON encoding, compact or pretty)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::Peer;
pub use response::{ContentEncoding, WriterCapabilities};
pub use server::{build_router, AppState, HttpServer};
