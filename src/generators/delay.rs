//! `/delay/{n}`: wait up to ten seconds, then reflect the request.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::error::DumpError;
use crate::generators::parse_int;
use crate::http::response::json_response;
use crate::http::server::AppState;
use crate::inspect::RequestSnapshot;

/// Longest delay honoured, in seconds.
pub const MAX_DELAY_SECS: u64 = 10;

/// Seconds to wait for a requested `n`: capped, and zero for `n <= 0`.
pub fn delay_secs(n: i64) -> u64 {
    n.clamp(0, MAX_DELAY_SECS as i64) as u64
}

pub async fn delay(
    State(state): State<AppState>,
    Path(n): Path<String>,
    snapshot: RequestSnapshot,
) -> Result<Response, DumpError> {
    let secs = delay_secs(parse_int(&n, DumpError::MissingDelay)?);
    if secs > 0 {
        tracing::debug!(secs, "Delaying response");
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }
    json_response(&snapshot, StatusCode::OK, state.pretty())
}
