//! `/stream/{n}`: `n` snapshot documents, one body frame each.
//!
//! Documents are compact JSON, one per line, whatever the output mode.

use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::stream::{unfold, Stream};

use crate::error::DumpError;
use crate::generators::parse_int;
use crate::http::response::{encode_document, WriterCapabilities};
use crate::inspect::RequestSnapshot;

/// Most documents a single stream carries.
pub const MAX_LINES: i64 = 100;

/// Validate the count and clamp it to [`MAX_LINES`].
pub fn parse_lines(raw: &str) -> Result<usize, DumpError> {
    match parse_int(raw, DumpError::WantInteger)? {
        n if n < 0 => Err(DumpError::WantInteger),
        n => Ok(n.min(MAX_LINES) as usize),
    }
}

/// Frames of `lines` newline-terminated copies of `snapshot`.
///
/// An encoding failure ends the stream without an error frame. A client
/// hanging up drops the stream, which ends production the same way.
pub fn documents(
    snapshot: RequestSnapshot,
    lines: usize,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    unfold((0usize, snapshot), move |(sent, snapshot)| async move {
        if sent >= lines {
            return None;
        }
        match encode_document(&snapshot) {
            Ok(document) => Some((Ok(Bytes::from(document)), (sent + 1, snapshot))),
            Err(e) => {
                tracing::debug!(sent, error = %e, "Stopping stream");
                None
            }
        }
    })
}

pub async fn stream(
    Path(n): Path<String>,
    capabilities: WriterCapabilities,
    snapshot: RequestSnapshot,
) -> Result<Response, DumpError> {
    let lines = parse_lines(&n)?;
    if !capabilities.can_flush() {
        return Err(DumpError::StreamingNotSupported);
    }

    tracing::debug!(lines, "Streaming snapshots");
    let body = Body::from_stream(documents(snapshot, lines));
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
