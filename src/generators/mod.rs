//! Reflection endpoints and synthetic response generators.
//!
//! # Data Flow
//! ```text
//! ParseParams (path segment / query)
//!     → Validate (client error, no side effects)
//!     → Produce (status, bytes, stream, delay, redirect, auth, reflection)
//! ```
//!
//! # Design Decisions
//! - Counts are parsed as signed integers so `-1` is a range error, not a parse error
//! - Counts past a cap are clamped silently where the endpoint allows it

pub mod auth;
pub mod bytes;
pub mod delay;
pub mod index;
pub mod redirect;
pub mod reflect;
pub mod status;
pub mod stream;

use crate::error::DumpError;

/// Parse a decimal path segment, mapping failure to `err`.
pub(crate) fn parse_int(raw: &str, err: DumpError) -> Result<i64, DumpError> {
    raw.parse::<i64>().map_err(|_| err)
}

/// Look up the first value of a query parameter, percent-decoded.
pub(crate) fn query_value(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
