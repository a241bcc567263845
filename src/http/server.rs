//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the endpoint table
//! - Wire up middleware (tracing, timeout, metrics, CORS, capabilities)
//! - Bind server to listener
//! - Graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{Extensions, HeaderMap, StatusCode, Version},
    middleware,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::DumpConfig;
use crate::generators::{auth, bytes, delay, index, redirect, reflect, status, stream};
use crate::http::middleware::{attach_capabilities, cors, gzip_capability};
use crate::http::request::request_span;
use crate::http::response::WriterCapabilities;
use crate::lifecycle::shutdown::shutdown_signal;
use crate::observability::metrics;

/// Application state injected into handlers.
///
/// Holds only the startup configuration; nothing in here changes after the
/// server is built.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DumpConfig>,
}

impl AppState {
    pub fn new(config: DumpConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Tab-indent JSON documents.
    pub fn pretty(&self) -> bool {
        self.config.output.pretty
    }

    /// Log every request line.
    pub fn debug(&self) -> bool {
        self.config.observability.debug
    }
}

/// HTTP server for the echo service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: DumpConfig) -> Self {
        let state = AppState::new(config);
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or a shutdown trigger.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            pretty = self.state.pretty(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DumpConfig {
        &self.state.config
    }
}

// Compress exactly the responses whose handler saw a gzip writer, regardless
// of size, so the `gzipped` flag always tells the truth.
fn marked_for_gzip(_: StatusCode, _: Version, _: &HeaderMap, extensions: &Extensions) -> bool {
    extensions
        .get::<WriterCapabilities>()
        .is_some_and(WriterCapabilities::is_compressing)
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);

    Router::new()
        .route("/", any(index::index))
        .route("/ip", any(reflect::ip))
        .route("/user-agent", any(reflect::user_agent))
        .route("/headers", any(reflect::headers))
        .route("/get", any(reflect::get))
        .route(
            "/gzip",
            any(reflect::gzip)
                .layer(CompressionLayer::new().compress_when(marked_for_gzip))
                .layer(middleware::from_fn(gzip_capability)),
        )
        .route("/status/{code}", any(status::status))
        .route("/bytes/{n}", any(bytes::bytes))
        .route("/stream/{n}", any(stream::stream))
        .route("/delay/{n}", any(delay::delay))
        .route("/redirect-to", any(redirect::redirect_to))
        .route("/basic-auth/{user}/{passwd}", any(auth::basic_auth))
        .route("/hidden-basic-auth/{user}/{passwd}", any(auth::hidden_basic_auth))
        .fallback(|| async { auth::not_found() })
        .layer(middleware::from_fn(attach_capabilities))
        .layer(middleware::from_fn_with_state(state.clone(), cors))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}
