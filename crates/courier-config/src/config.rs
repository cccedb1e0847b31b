//! Top-level configuration type.

use serde::{Deserialize, Serialize};

use courier_core::{Classifier, MissingInput, Renderer};
use courier_telemetry::LogConfig;

use crate::{ClassifyConfig, ConfigError, LoggingConfig, RenderConfig};

/// Complete Courier configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use courier_config::CourierConfig;
///
/// let config = CourierConfig::default();
/// assert_eq!(config.render.receiver, "req");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    /// Statement rendering.
    #[serde(default)]
    pub render: RenderConfig,

    /// Attribute classification.
    #[serde(default)]
    pub classify: ClassifyConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CourierConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `render.receiver` is not a Rust identifier
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if syn::parse_str::<syn::Ident>(&self.render.receiver).is_err() {
            return Err(ConfigError::invalid_value(
                "render.receiver",
                format!("`{}` is not a Rust identifier", self.render.receiver),
            ));
        }

        if let Err(e) = courier_telemetry::create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        Ok(())
    }

    /// Development preset: debug logging with locations, malformed
    /// attributes are skipped.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig::from(&LogConfig::development()),
            ..Self::default()
        }
    }

    /// CI preset: JSON logs, and any malformed attribute or unbound input
    /// is an error.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            render: RenderConfig {
                missing_input: MissingInput::Error,
                ..RenderConfig::default()
            },
            classify: ClassifyConfig {
                malformed: courier_core::MalformedAttributes::Reject,
                duplicate_labels: courier_core::DuplicateLabels::Reject,
            },
            logging: LoggingConfig::from(&LogConfig::production()),
        }
    }

    /// The configured classifier.
    pub const fn classifier(&self) -> Classifier {
        self.classify.classifier()
    }

    /// The configured renderer.
    pub fn renderer(&self) -> Renderer {
        self.render.renderer()
    }
}
