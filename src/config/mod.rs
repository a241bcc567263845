//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → DumpConfig (validated, immutable)
//!     → shared via Arc to every handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::DumpConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::OutputConfig;
pub use schema::TimeoutConfig;
