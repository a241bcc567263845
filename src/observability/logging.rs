//! Structured logging.
//!
//! `RUST_LOG` wins when set. Otherwise `--debug` turns on debug output for
//! this crate and `tower_http`, and the configured level applies in all other
//! cases.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    if config.debug {
        "httpdump=debug,tower_http=debug".to_string()
    } else {
        format!("httpdump={},tower_http=warn", config.log_level.to_ascii_lowercase())
    }
}

/// Install the global subscriber.
pub fn init_logging(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(config))),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
