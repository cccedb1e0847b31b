//! Typed configuration for Courier code generation.
//!
//! Configuration is layered: built-in defaults, then a TOML or JSON file,
//! then environment variables. The result is validated before use.
//!
//! - [`RenderConfig`] - request variable name and missing-input policy
//! - [`ClassifyConfig`] - malformed-attribute and duplicate-label policies
//! - [`LoggingConfig`] - log level and format for the CLI
//!
//! # Example
//!
//! ```no_run
//! use courier_config::ConfigLoader;
//!
//! # fn main() -> Result<(), courier_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("courier.toml")?
//!     .with_env_prefix("COURIER")
//!     .load()?;
//!
//! let renderer = config.renderer();
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [render]
//! receiver = "req"
//! missing_input = "sentinel"   # or "error"
//!
//! [classify]
//! malformed = "skip"           # or "reject"
//! duplicate_labels = "last_wins"  # or "reject"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "pretty"            # or "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY`, for example
//! `COURIER__RENDER__RECEIVER=request` or `COURIER__LOGGING__FORMAT=json`.

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::CourierConfig;
pub use error::ConfigError;
pub use loader::{ConfigLoader, CONFIG_FILE_NAME};
pub use schema::{ClassifyConfig, LogFormat, LoggingConfig, RenderConfig};
