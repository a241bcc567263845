//! httpdump: HTTP Request & Response Service
//!
//! ```text
//!     Client Request
//!     ───────────────▶ trace / timeout / metrics
//!                          │
//!                          ▼
//!                      cors (echo Origin, answer preflight)
//!                          │
//!                          ▼
//!                      capabilities (flush? compress?)
//!                          │
//!                          ▼
//!                      route table ──▶ reflection (snapshot, origin)
//!                                 └──▶ generators (status, bytes, stream,
//!                                       delay, redirect, basic auth)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use httpdump::config::{load_config, validation::validate_config, ConfigError, DumpConfig};
use httpdump::observability::{logging, metrics};
use httpdump::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "httpdump")]
#[command(about = "HTTP request & response diagnostic service", version)]
struct Cli {
    /// The host and port to listen on
    #[arg(long)]
    listen: Option<String>,

    /// Pretty print json output
    #[arg(long)]
    pretty: bool,

    /// Log requests to stdout
    #[arg(long)]
    debug: bool,

    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<DumpConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DumpConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listener.bind_address = listen;
        }
        config.output.pretty |= self.pretty;
        config.observability.debug |= self.debug;

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability)?;
    tracing::info!("httpdump v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        pretty = config.output.pretty,
        debug = config.observability.debug,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address.as_str()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
