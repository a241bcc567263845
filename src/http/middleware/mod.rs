//! Middleware wrapping every handler.
//!
//! # Data Flow
//! ```text
//! request
//!     → cors.rs (echo Origin, answer preflight)
//!     → capabilities.rs (attach WriterCapabilities)
//!     → handler
//! ```

pub mod capabilities;
pub mod cors;

pub use capabilities::{attach_capabilities, gzip_capability};
pub use cors::cors;
