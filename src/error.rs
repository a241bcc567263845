//! Error types surfaced by the request handlers.
//!
//! Every variant maps to a plain-text response; there is no structured error
//! body. Client disconnects during streaming are not errors and never reach
//! this type.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::generators::bytes::MAX_BYTES;

/// Errors that end a request before (or instead of) a generator producing output.
#[derive(Debug, Error)]
pub enum DumpError {
    /// A `{n}` path segment was not an integer (or was negative where counts are expected).
    #[error("n must be an integer")]
    WantInteger,

    /// The status segment was not an integer.
    #[error("status code must be an integer")]
    StatusNotInteger,

    /// The status is an integer the HTTP wire format cannot carry as a
    /// final response.
    #[error("status code must be in range: 200 - 999")]
    StatusOutOfRange(i64),

    /// The byte count is outside `0..=MAX_BYTES`.
    #[error("number of bytes must be in range: 0 - {}", MAX_BYTES)]
    ByteRange,

    /// The optional `seed` query parameter was not an integer.
    #[error("seed must be an integer")]
    InvalidSeed,

    /// The delay segment was not an integer.
    #[error("you must specify a delay")]
    MissingDelay,

    /// The active response writer cannot be flushed incrementally.
    #[error("your client does not support streaming")]
    StreamingNotSupported,

    /// `/redirect-to` without a usable `url` parameter.
    #[error("bad URL")]
    BadUrl,

    /// Method other than the single one an endpoint accepts.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// JSON encoding failed.
    #[error("failed to encode response: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The operating system entropy source failed.
    #[error("failed to read random data: {0}")]
    Entropy(#[from] rand::Error),
}

impl DumpError {
    /// The status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            DumpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DumpError::Serialize(_) | DumpError::Entropy(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for DumpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Rejected request");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_client_errors() {
        assert_eq!(DumpError::WantInteger.status(), StatusCode::BAD_REQUEST);
        assert_eq!(DumpError::ByteRange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(DumpError::StreamingNotSupported.status(), StatusCode::BAD_REQUEST);
        assert_eq!(DumpError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn byte_range_message_names_the_cap() {
        assert_eq!(
            DumpError::ByteRange.to_string(),
            "number of bytes must be in range: 0 - 102400"
        );
    }

    #[test]
    fn response_is_plain_text() {
        let response = DumpError::BadUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
