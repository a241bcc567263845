//! Request snapshot construction.
//!
//! A [`RequestSnapshot`] is the record of what the server observed about one
//! inbound request. It is the payload of every reflection endpoint and of each
//! document on `/stream/{n}`.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::http::{header, request::Parts, uri::Scheme, HeaderMap, Uri};
use serde::Serialize;

use crate::inspect::origin::{peer_host, resolve_origin};

/// Name → values, every key present at least once. Keys serialize sorted.
pub type Multimap = BTreeMap<String, Vec<String>>;

/// Header entry synthesized from the request's host.
pub const HOST_KEY: &str = "Host";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Canonical snapshot of an inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSnapshot {
    pub args: Multimap,
    #[serde(skip_serializing_if = "is_false")]
    pub gzipped: bool,
    pub headers: Multimap,
    pub origin: String,
    pub url: String,
}

impl RequestSnapshot {
    /// Build a snapshot from buffered request metadata and the peer address.
    pub fn capture(parts: &Parts, peer: Option<SocketAddr>) -> Self {
        let host = request_host(&parts.uri, &parts.headers);
        Self {
            args: query_args(&parts.uri),
            gzipped: false,
            headers: header_map_with_host(&parts.headers, &host),
            origin: origin(&parts.headers, peer),
            url: absolute_url(&parts.uri, &host),
        }
    }

    /// Mark the snapshot as travelling through a compressing writer.
    pub fn with_gzipped(mut self, gzipped: bool) -> Self {
        self.gzipped = gzipped;
        self
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Apparent client origin for a request.
pub fn origin(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    resolve_origin(&peer_host(peer), forwarded.as_deref())
}

/// First `User-Agent` value, empty when absent.
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Host the request was addressed to: the URI authority when the request
/// target (or HTTP/2 pseudo-header) carries one, else the `Host` header.
pub fn request_host(uri: &Uri, headers: &HeaderMap) -> String {
    if let Some(authority) = uri.authority() {
        return authority.as_str().to_string();
    }
    headers
        .get(header::HOST)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Query parameters as decoded name → values, in order of appearance per name.
pub fn query_args(uri: &Uri) -> Multimap {
    let mut args = Multimap::new();
    if let Some(query) = uri.query() {
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            args.entry(name.into_owned()).or_default().push(value.into_owned());
        }
    }
    args
}

/// Copy every received header, then append the synthesized `Host` entry.
///
/// The copy is owned by the snapshot; the request's own header store is left
/// untouched. The transport's `host` header is skipped during the copy so the
/// appended entry is the only one.
pub fn header_map_with_host(headers: &HeaderMap, host: &str) -> Multimap {
    let mut copied = Multimap::new();
    for (name, value) in headers {
        if *name == header::HOST {
            continue;
        }
        copied
            .entry(canonical_header_name(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    copied.entry(HOST_KEY.to_string()).or_default().push(host.to_string());
    copied
}

/// Absolute URL: scheme, host, then the request target exactly as received.
pub fn absolute_url(uri: &Uri, host: &str) -> String {
    let scheme = if uri.scheme() == Some(&Scheme::HTTPS) {
        "https"
    } else {
        "http"
    };
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("{}://{}{}", scheme, host, target)
}

/// `content-type` → `Content-Type`: upper-case the first letter and every
/// letter following a hyphen, lower-case the rest.
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn empty_request_still_has_args_and_headers() {
        let snapshot = RequestSnapshot::capture(&parts("/get", &[("host", "localhost")]), None);
        assert!(snapshot.args.is_empty());
        assert_eq!(snapshot.headers.len(), 1);
        assert_eq!(snapshot.headers[HOST_KEY], vec!["localhost"]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["args"], serde_json::json!({}));
        assert!(json.get("gzipped").is_none());
    }

    #[test]
    fn repeated_query_parameters_keep_order() {
        let args = query_args(&"/get?b=2&a=1&b=3&c=hello+world%21".parse().unwrap());
        assert_eq!(args["a"], vec!["1"]);
        assert_eq!(args["b"], vec!["2", "3"]);
        assert_eq!(args["c"], vec!["hello world!"]);
    }

    #[test]
    fn headers_are_canonicalized_and_multi_valued() {
        let p = parts(
            "/headers",
            &[("host", "example.test"), ("x-trace", "a"), ("x-trace", "b"), ("accept", "*/*")],
        );
        let headers = header_map_with_host(&p.headers, &request_host(&p.uri, &p.headers));
        assert_eq!(headers["X-Trace"], vec!["a", "b"]);
        assert_eq!(headers["Accept"], vec!["*/*"]);
        assert_eq!(headers[HOST_KEY], vec!["example.test"]);
        assert!(!headers.contains_key("host"));
        // the request's own header store is not mutated
        assert_eq!(p.headers.len(), 4);
    }

    #[test]
    fn url_keeps_request_target_verbatim() {
        let p = parts("/get?q=%2Fpath&x", &[("host", "localhost:8090")]);
        assert_eq!(
            absolute_url(&p.uri, &request_host(&p.uri, &p.headers)),
            "http://localhost:8090/get?q=%2Fpath&x"
        );
    }

    #[test]
    fn https_scheme_and_authority_from_uri() {
        let p = parts("https://secure.test/get", &[]);
        let host = request_host(&p.uri, &p.headers);
        assert_eq!(host, "secure.test");
        assert_eq!(absolute_url(&p.uri, &host), "https://secure.test/get");
    }

    #[test]
    fn origin_uses_forwarded_header() {
        let p = parts("/ip", &[("x-forwarded-for", "2.2.2.2")]);
        assert_eq!(origin(&p.headers, Some("127.0.0.1:4000".parse().unwrap())), "2.2.2.2");
        assert_eq!(origin(&p.headers, Some("9.9.9.9:4000".parse().unwrap())), "2.2.2.2, 9.9.9.9");
    }

    #[test]
    fn gzipped_flag_serializes_only_when_set() {
        let snapshot = RequestSnapshot::capture(&parts("/gzip", &[]), None).with_gzipped(true);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["gzipped"], true);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-csrf-token"), "X-Csrf-Token");
        assert_eq!(canonical_header_name("dnt"), "Dnt");
    }
}
