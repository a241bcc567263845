//! Origin resolution.
//!
//! Derives the client's apparent address from the transport peer address and
//! the `X-Forwarded-For` header. The forwarded value is never validated; it is
//! echoed as an opaque string.

use std::net::SocketAddr;

/// Peer address of a proxy running on the same host. A forwarded value seen
/// through this hop replaces the hop entirely.
pub const LOOPBACK: &str = "127.0.0.1";

/// Host part of a peer address, port discarded.
///
/// An unknown peer yields an empty host.
pub fn peer_host(peer: Option<SocketAddr>) -> String {
    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

/// Combine the raw peer host with the forwarded header into the display origin.
pub fn resolve_origin(host: &str, forwarded: Option<&str>) -> String {
    match forwarded {
        Some(forwarded) if !forwarded.is_empty() && forwarded != host => {
            if host == LOOPBACK {
                forwarded.to_string()
            } else {
                format!("{}, {}", forwarded, host)
            }
        }
        _ => host.to_string(),
    }
}
