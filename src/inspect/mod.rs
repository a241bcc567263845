//! Request inspection subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request parts + peer address
//!     → origin.rs (apparent client address under proxying)
//!     → snapshot.rs (args, headers + Host, origin, absolute URL)
//!     → serialized by http::response
//! ```
//!
//! # Design Decisions
//! - Pure functions over already-buffered metadata; no I/O
//! - A snapshot is built fresh per request and never stored

pub mod origin;
pub mod snapshot;

pub use origin::{resolve_origin, LOOPBACK};
pub use snapshot::{canonical_header_name, RequestSnapshot};
