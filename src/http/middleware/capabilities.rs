//! Writer capability marking.
//!
//! Handlers never inspect the concrete body or layer stack; they ask the
//! [`WriterCapabilities`] extension attached here.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::http::response::{negotiate_gzip, WriterCapabilities};

/// Attach the capabilities of the plain connection writer, unless an outer
/// layer already described the writer.
pub async fn attach_capabilities(mut request: Request<Body>, next: Next) -> Response {
    if request.extensions().get::<WriterCapabilities>().is_none() {
        request.extensions_mut().insert(WriterCapabilities::plain());
    }
    next.run(request).await
}

/// Mark the request as answered through the gzip writer when the client's
/// `Accept-Encoding` selects gzip. Must sit outside the compression layer on
/// the same route; the handler copies the mark onto its response and the
/// layer only compresses responses carrying it.
pub async fn gzip_capability(mut request: Request<Body>, next: Next) -> Response {
    let Some(encoding) = negotiate_gzip(request.headers()) else {
        return next.run(request).await;
    };
    let capabilities = request
        .extensions()
        .get::<WriterCapabilities>()
        .copied()
        .unwrap_or_default()
        .compressed(encoding);
    request.extensions_mut().insert(capabilities);
    next.run(request).await
}
