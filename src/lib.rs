//! httpdump: an HTTP request & response diagnostic service.
//!
//! Reflection endpoints return what the server observed about a request;
//! generator endpoints answer with a shape the caller picks (status, random
//! bytes, a stream of documents, a delay, a redirect, a Basic Auth challenge).

pub mod config;
pub mod error;
pub mod generators;
pub mod http;
pub mod inspect;
pub mod lifecycle;
pub mod observability;

pub use config::DumpConfig;
pub use error::DumpError;
pub use http::HttpServer;
pub use inspect::RequestSnapshot;
pub use lifecycle::Shutdown;
