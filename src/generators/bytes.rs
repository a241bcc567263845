//! `/bytes/{n}`: `n` random bytes of binary data.
//!
//! Output comes from the operating system's entropy source unless a `seed`
//! query parameter asks for a reproducible sequence.

use axum::{
    extract::{Path, RawQuery},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rand::{rngs::OsRng, rngs::StdRng, RngCore, SeedableRng};

use crate::error::DumpError;
use crate::generators::{parse_int, query_value};

/// Largest body `/bytes/{n}` will produce.
pub const MAX_BYTES: i64 = 102_400;

/// Validate the requested count against `0..=MAX_BYTES`.
pub fn parse_count(raw: &str) -> Result<usize, DumpError> {
    match parse_int(raw, DumpError::ByteRange)? {
        n @ 0..=MAX_BYTES => Ok(n as usize),
        _ => Err(DumpError::ByteRange),
    }
}

/// Fill a buffer of `n` bytes, seeded when `seed` is given.
pub fn random_bytes(n: usize, seed: Option<u64>) -> Result<Vec<u8>, DumpError> {
    let mut buf = vec![0u8; n];
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed).fill_bytes(&mut buf),
        None => OsRng.try_fill_bytes(&mut buf)?,
    }
    Ok(buf)
}

pub async fn bytes(Path(n): Path<String>, RawQuery(query): RawQuery) -> Result<Response, DumpError> {
    let n = parse_count(&n)?;
    let seed = query_value(query.as_deref(), "seed")
        .map(|seed| parse_int(&seed, DumpError::InvalidSeed).map(|seed| seed as u64))
        .transpose()?;

    let body = random_bytes(n, seed)?;
    tracing::debug!(bytes = n, seeded = seed.is_some(), "Generated random body");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        body,
    )
        .into_response())
}
