//! Configuration schema types.
//!
//! This module defines the structure of each configuration section.

use courier_core::{DuplicateLabels, MalformedAttributes, MissingInput, DEFAULT_RECEIVER};
use courier_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

/// Statement rendering section.
///
/// # Example
///
/// ```
/// use courier_config::RenderConfig;
/// use courier_core::MissingInput;
///
/// let config = RenderConfig {
///     receiver: "request".to_string(),
///     missing_input: MissingInput::Error,
/// };
/// assert_eq!(config.renderer().receiver(), "request");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Name of the request builder variable in generated methods.
    #[serde(default = "default_receiver")]
    pub receiver: String,

    /// What a parameter directive without an input renders as.
    #[serde(default)]
    pub missing_input: MissingInput,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            receiver: default_receiver(),
            missing_input: MissingInput::default(),
        }
    }
}

impl RenderConfig {
    /// Builds the renderer this section describes.
    pub fn renderer(&self) -> courier_core::Renderer {
        courier_core::Renderer::new()
            .with_receiver(self.receiver.clone())
            .with_missing_input(self.missing_input)
    }
}

fn default_receiver() -> String {
    DEFAULT_RECEIVER.to_string()
}

/// Attribute classification section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ClassifyConfig {
    /// Handling of recognized attributes missing a required argument.
    #[serde(default)]
    pub malformed: MalformedAttributes,

    /// Handling of repeated labeled arguments.
    #[serde(default)]
    pub duplicate_labels: DuplicateLabels,
}

impl ClassifyConfig {
    /// Builds the classifier this section describes.
    pub const fn classifier(&self) -> courier_core::Classifier {
        courier_core::Classifier::new()
            .with_malformed(self.malformed)
            .with_duplicate_labels(self.duplicate_labels)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// JSON formatted logs.
    Json,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Level name or filter directive (e.g. `info`, `courier_codegen=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the telemetry crate's logging configuration.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            include_target: true,
        }
    }
}

impl From<&LogConfig> for LoggingConfig {
    fn from(config: &LogConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            format: if config.json_format {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            include_location: config.file_line_info,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.receiver, "req");
        assert_eq!(config.missing_input, MissingInput::Sentinel);
    }

    #[test]
    fn test_render_unknown_field_rejected() {
        let result: Result<RenderConfig, _> = toml::from_str("reciever = \"r\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_classify_from_toml() {
        let config: ClassifyConfig =
            toml::from_str("malformed = \"reject\"\nduplicate_labels = \"reject\"").unwrap();
        assert_eq!(config.malformed, MalformedAttributes::Reject);
        assert_eq!(config.duplicate_labels, DuplicateLabels::Reject);

        let classifier = config.classifier();
        assert_eq!(classifier.malformed(), MalformedAttributes::Reject);
    }

    #[test]
    fn test_missing_input_values() {
        let config: RenderConfig = toml::from_str("missing_input = \"error\"").unwrap();
        assert_eq!(config.missing_input, MissingInput::Error);
        assert_eq!(config.renderer().missing_input(), MissingInput::Error);
    }

    #[test]
    fn test_log_format_serialization() {
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), "\"json\"");
        assert_eq!(serde_json::to_string(&LogFormat::Pretty).unwrap(), "\"pretty\"");
    }

    #[test]
    fn test_log_config_conversion() {
        let config = LoggingConfig {
            format: LogFormat::Json,
            include_location: true,
            ..Default::default()
        };
        let log = config.log_config();
        assert!(log.json_format);
        assert!(log.file_line_info);
        assert_eq!(log.level, "warn");
    }

    #[test]
    fn test_from_log_config() {
        let config = LoggingConfig::from(&LogConfig::production());
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
        assert!(!config.include_location);
    }
}
