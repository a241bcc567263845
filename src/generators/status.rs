//! `/status/{code}`: answer with the requested status and an empty body.

use axum::{extract::Path, http::StatusCode};

use crate::error::DumpError;
use crate::generators::parse_int;

/// Lowest status a handler may answer with. 1xx codes are interim and never
/// end an exchange.
pub const MIN_STATUS: i64 = 200;
/// Highest status the three-digit status line can carry.
pub const MAX_STATUS: i64 = 999;

/// Any final status the status line can carry is accepted, standard or not.
pub fn parse_status(raw: &str) -> Result<StatusCode, DumpError> {
    let code = parse_int(raw, DumpError::StatusNotInteger)?;
    if !(MIN_STATUS..=MAX_STATUS).contains(&code) {
        return Err(DumpError::StatusOutOfRange(code));
    }
    u16::try_from(code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or(DumpError::StatusOutOfRange(code))
}

pub async fn status(Path(code): Path<String>) -> Result<StatusCode, DumpError> {
    parse_status(&code)
}
