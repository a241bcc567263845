//! Cross-origin middleware.
//!
//! Any page may call any endpoint: a request carrying `Origin` gets that
//! origin echoed back as allowed, and a preflight is answered here without
//! reaching the handler.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

pub const ALLOW_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";
pub const ALLOW_HEADERS: &str =
    "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

pub async fn cors(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    if state.debug() {
        tracing::info!(method = %request.method(), target = %request.uri(), "Request");
    }

    let origin = match request.headers().get(header::ORIGIN) {
        Some(origin) if !origin.is_empty() => origin.clone(),
        _ => return next.run(request).await,
    };

    let mut response = if request.method() == Method::OPTIONS {
        tracing::debug!(origin = ?origin, "Answering preflight");
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}
