//! Response encoding and writer capabilities.
//!
//! # Responsibilities
//! - Encode JSON documents in the process-wide mode (compact or tab-indented)
//! - Describe what the active response writer can do (flush, compress)
//!
//! # Design Decisions
//! - Compact documents end with a newline; pretty documents do not
//! - Stream documents are always compact, one per line
//! - Capabilities travel as a request extension and are queried explicitly

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::DumpError;

/// Encode `value` as one JSON document.
pub fn encode_json<T: Serialize>(value: &T, pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
    if pretty {
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
        value.serialize(&mut serializer)?;
        Ok(out)
    } else {
        let mut out = serde_json::to_vec(value)?;
        out.push(b'\n');
        Ok(out)
    }
}

/// Encode `value` as one line of a newline-delimited stream.
pub fn encode_document<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    encode_json(value, false)
}

/// A complete JSON response with the given status.
pub fn json_response<T: Serialize>(
    value: &T,
    status: StatusCode,
    pretty: bool,
) -> Result<Response, DumpError> {
    let body = encode_json(value, pretty)?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Content coding applied by a wrapping writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

/// What the writer producing this request's response is able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterCapabilities {
    flushable: bool,
    compression: Option<ContentEncoding>,
}

impl WriterCapabilities {
    /// The connection's own writer. It flushes on every protocol version;
    /// HTTP/1.0 bodies are delimited by closing the connection.
    pub fn plain() -> Self {
        Self {
            flushable: true,
            compression: None,
        }
    }

    /// The same writer wrapped by a compressing encoder. The encoder buffers,
    /// so individual documents are no longer flushed on their own.
    pub fn compressed(self, encoding: ContentEncoding) -> Self {
        Self {
            flushable: false,
            compression: Some(encoding),
        }
    }

    /// Can the body be flushed to the client piece by piece?
    pub fn can_flush(&self) -> bool {
        self.flushable
    }

    /// Is a compression-wrapping writer active?
    pub fn is_compressing(&self) -> bool {
        self.compression.is_some()
    }

    pub fn compression(&self) -> Option<ContentEncoding> {
        self.compression
    }
}

impl Default for WriterCapabilities {
    fn default() -> Self {
        Self::plain()
    }
}

impl<S> FromRequestParts<S> for WriterCapabilities
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<WriterCapabilities>()
            .copied()
            .unwrap_or_default())
    }
}

/// Quality of a coding in thousandths, as carried by `;q=`.
///
/// Only the `qvalue` grammar is accepted: `0` with up to three decimals, or
/// `1` with up to three zero decimals. Anything else voids the entry, which
/// is also how the compression layer treats it.
fn parse_quality(params: &str) -> Option<u16> {
    let params = params.trim();
    let value = params.strip_prefix("q=").or_else(|| params.strip_prefix("Q="))?;
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let thousandths = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0'));
    match whole {
        "0" => Some(thousandths),
        "1" if thousandths == 0 => Some(1000),
        _ => None,
    }
}

/// Negotiate the response coding from `Accept-Encoding` when only gzip is on
/// offer. `identity` wins ties, entries with `q=0` are refused, and entries
/// with unparseable parameters are ignored.
pub fn negotiate_gzip(headers: &HeaderMap) -> Option<ContentEncoding> {
    // (quality, rank) where identity outranks gzip
    let mut best: Option<(u16, u8)> = None;
    let offers = headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','));

    for offer in offers {
        let mut pieces = offer.splitn(2, ';');
        let rank = match pieces.next().map(str::trim) {
            Some(name) if name.eq_ignore_ascii_case("gzip") || name.eq_ignore_ascii_case("x-gzip") => 0,
            Some(name) if name.eq_ignore_ascii_case("identity") => 1,
            _ => continue,
        };
        let quality = match pieces.next() {
            Some(params) => match parse_quality(params) {
                Some(q) => q,
                None => continue,
            },
            None => 1000,
        };
        if quality == 0 {
            continue;
        }
        if best.map_or(true, |current| (quality, rank) > current) {
            best = Some((quality, rank));
        }
    }

    match best {
        Some((_, 0)) => Some(ContentEncoding::Gzip),
        _ => None,
    }
}
