//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use httpdump::{DumpConfig, HttpServer, Shutdown};
use tokio::net::TcpListener;

/// A server bound to an ephemeral loopback port. Dropping it shuts it down.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the service with the given configuration.
pub async fn start_server(mut config: DumpConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        _shutdown: shutdown,
    }
}

/// A client that never routes through an environment proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
