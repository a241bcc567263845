//! Request-side extraction.
//!
//! # Responsibilities
//! - Resolve the transport peer address (when the server provides one)
//! - Build a [`RequestSnapshot`] straight from request parts
//! - Create one tracing span per request with a fresh request ID
//!
//! # Design Decisions
//! - Request ID lives in the span only; echoed headers stay untouched
//! - A missing peer address is not a rejection, it yields an empty host

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, Request},
};
use tracing::Span;
use uuid::Uuid;

use crate::inspect::RequestSnapshot;

/// Transport-level address of the client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peer(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for Peer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let addr = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr);
        Ok(Peer(addr))
    }
}

impl<S> FromRequestParts<S> for RequestSnapshot
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Peer(peer) = Peer::from_request_parts(parts, state).await?;
        Ok(RequestSnapshot::capture(parts, peer))
    }
}

/// Span for one request, tagged with a generated request ID.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}
