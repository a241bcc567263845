//! Reflection endpoints: `/get`, `/gzip`, `/headers`, `/ip`, `/user-agent`.

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
};
use serde::Serialize;

use crate::error::DumpError;
use crate::http::request::Peer;
use crate::http::response::{json_response, WriterCapabilities};
use crate::http::server::AppState;
use crate::inspect::snapshot::{self, RequestSnapshot};

#[derive(Debug, Serialize)]
pub struct OriginView {
    pub origin: String,
}

#[derive(Debug, Serialize)]
pub struct UserAgentView {
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

pub async fn get(
    State(state): State<AppState>,
    method: Method,
    snapshot: RequestSnapshot,
) -> Result<Response, DumpError> {
    if method != Method::GET {
        return Err(DumpError::MethodNotAllowed);
    }
    json_response(&snapshot, StatusCode::OK, state.pretty())
}

/// The snapshot, flagged when the response passes through the gzip writer.
pub async fn gzip(
    State(state): State<AppState>,
    capabilities: WriterCapabilities,
    snapshot: RequestSnapshot,
) -> Result<Response, DumpError> {
    let snapshot = snapshot.with_gzipped(capabilities.is_compressing());
    let mut response = json_response(&snapshot, StatusCode::OK, state.pretty())?;
    response.extensions_mut().insert(capabilities);
    Ok(response)
}

/// Received headers plus the synthesized `Host` entry.
pub async fn headers(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, DumpError> {
    let host = snapshot::request_host(&uri, &headers);
    let reflected = snapshot::header_map_with_host(&headers, &host);
    json_response(&reflected, StatusCode::OK, state.pretty())
}

pub async fn ip(
    State(state): State<AppState>,
    Peer(peer): Peer,
    headers: HeaderMap,
) -> Result<Response, DumpError> {
    let view = OriginView {
        origin: snapshot::origin(&headers, peer),
    };
    json_response(&view, StatusCode::OK, state.pretty())
}

pub async fn user_agent(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, DumpError> {
    let view = UserAgentView {
        user_agent: snapshot::user_agent(&headers),
    };
    json_response(&view, StatusCode::OK, state.pretty())
}
