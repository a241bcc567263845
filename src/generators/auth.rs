//! `/basic-auth/{user}/{passwd}` and `/hidden-basic-auth/{user}/{passwd}`.
//!
//! The credentials the client must present are the ones named in the path.
//! A failed attempt is answered with a challenge on the visible endpoint and
//! with a plain 404 on the hidden one, so probing cannot tell it exists.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD as ENGINE;
use base64::Engine;
use serde::Serialize;

use crate::error::DumpError;
use crate::http::response::json_response;
use crate::http::server::AppState;

pub const REALM_CHALLENGE: &str = "Basic realm=\"httpdump\"";

const BASIC_PREFIX: &str = "Basic ";

/// Body of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthChallengeResult {
    pub authenticated: bool,
    pub user: String,
}

/// How an endpoint answers a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// 401 with a `WWW-Authenticate` challenge.
    Challenge,
    /// 404, indistinguishable from an unknown path.
    Conceal,
}

/// Decoded `user:password` bytes of an `Authorization: Basic` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(Vec<u8>, Vec<u8>)> {
    let value = headers.get(header::AUTHORIZATION)?.as_bytes();
    let prefix = BASIC_PREFIX.as_bytes();
    if value.len() < prefix.len() || !value[..prefix.len()].eq_ignore_ascii_case(prefix) {
        return None;
    }
    let decoded = ENGINE.decode(&value[prefix.len()..]).ok()?;
    let colon = decoded.iter().position(|b| *b == b':')?;
    Some((decoded[..colon].to_vec(), decoded[colon + 1..].to_vec()))
}

/// Do the presented credentials equal the expected pair exactly?
pub fn credentials_match(headers: &HeaderMap, user: &str, passwd: &str) -> bool {
    matches!(
        basic_credentials(headers),
        Some((u, p)) if u == user.as_bytes() && p == passwd.as_bytes()
    )
}

fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    user: String,
    passwd: &str,
    on_failure: OnFailure,
) -> Result<Response, DumpError> {
    if credentials_match(headers, &user, passwd) {
        tracing::debug!(user = %user, "Basic auth accepted");
        let result = AuthChallengeResult {
            authenticated: true,
            user,
        };
        return json_response(&result, StatusCode::OK, state.pretty());
    }

    tracing::debug!(user = %user, mode = ?on_failure, "Basic auth rejected");
    Ok(match on_failure {
        OnFailure::Challenge => (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM_CHALLENGE))],
        )
            .into_response(),
        OnFailure::Conceal => not_found(),
    })
}

/// The response an unknown path gets.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "404 page not found\n",
    )
        .into_response()
}

pub async fn basic_auth(
    State(state): State<AppState>,
    Path((user, passwd)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, DumpError> {
    authenticate(&state, &headers, user, &passwd, OnFailure::Challenge)
}

pub async fn hidden_basic_auth(
    State(state): State<AppState>,
    Path((user, passwd)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, DumpError> {
    authenticate(&state, &headers, user, &passwd, OnFailure::Conceal)
}
