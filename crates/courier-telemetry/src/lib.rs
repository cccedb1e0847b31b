//! Logging setup for Courier tools.
//!
//! Library crates only emit `tracing` events; binaries call [`init_logging`]
//! once at startup to install a `tracing-subscriber` registry with an
//! [`EnvFilter`](tracing_subscriber::EnvFilter) and a pretty or JSON
//! formatter.

#![warn(missing_docs)]

mod error;
mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
