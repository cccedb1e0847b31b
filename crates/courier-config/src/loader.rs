//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::env;
use std::fs;
use std::path::Path;

use courier_core::{DuplicateLabels, MalformedAttributes, MissingInput};

use crate::{ConfigError, CourierConfig, LogFormat};

/// File name looked up next to a crate manifest or in the working directory.
pub const CONFIG_FILE_NAME: &str = "courier.toml";

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values
/// 2. Configuration file (TOML or JSON) or string
/// 3. Environment variables
///
/// # Example
///
/// ```no_run
/// use courier_config::ConfigLoader;
///
/// # fn main() -> Result<(), courier_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("courier.toml")?
///     .with_env_prefix("COURIER")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: CourierConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CourierConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with default configuration values.
    ///
    /// This is what `new()` starts with, but can be chained for clarity.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = CourierConfig::default();
        self
    }

    /// Start with the development preset.
    ///
    /// # Example
    ///
    /// ```
    /// use courier_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = CourierConfig::development();
        self
    }

    /// Start with the strict preset.
    #[must_use]
    pub fn with_strict(mut self) -> Self {
        self.config = CourierConfig::strict();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format (TOML or JSON) is chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON
    /// - The file contains unknown fields
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format ("toml" or "json").
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use courier_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [render]
    ///     receiver = "request"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.render.receiver, "request");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        Ok(self)
    }

    /// Set the environment variable prefix for overrides.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`, e.g.
    /// `COURIER__RENDER__RECEIVER=request`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a `.env` file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::validation_error(format!("invalid .env file: {e}"))),
        }
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or validation
    /// fails.
    pub fn load(mut self) -> Result<CourierConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Finalize without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> CourierConfig {
        self.config
    }

    // Parse configuration file based on extension
    fn parse_file(content: &str, path: &Path) -> Result<CourierConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            // Shares the prefix but is not ours, e.g. COURIER_HOME.
            return Ok(());
        };

        let parts: Vec<&str> = rest.split("__").collect();

        match parts.as_slice() {
            ["RENDER", "RECEIVER"] => {
                self.config.render.receiver = value.to_string();
            }
            ["RENDER", "MISSING_INPUT"] => {
                self.config.render.missing_input = match value.to_lowercase().as_str() {
                    "sentinel" => MissingInput::Sentinel,
                    "error" => MissingInput::Error,
                    _ => return Err(ConfigError::env_parse_error(key, "expected 'sentinel' or 'error'")),
                };
            }

            ["CLASSIFY", "MALFORMED"] => {
                self.config.classify.malformed = match value.to_lowercase().as_str() {
                    "skip" => MalformedAttributes::Skip,
                    "reject" => MalformedAttributes::Reject,
                    _ => return Err(ConfigError::env_parse_error(key, "expected 'skip' or 'reject'")),
                };
            }
            ["CLASSIFY", "DUPLICATE_LABELS"] => {
                self.config.classify.duplicate_labels = match value.to_lowercase().as_str() {
                    "last_wins" => DuplicateLabels::LastWins,
                    "reject" => DuplicateLabels::Reject,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'last_wins' or 'reject'",
                        ))
                    }
                };
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => return Err(ConfigError::env_parse_error(key, "expected 'json' or 'pretty'")),
                };
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            _ => {
                return Err(ConfigError::env_parse_error(key, "unknown configuration key"));
            }
        }

        Ok(())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, CourierConfig::default());
    }

    #[test]
    fn test_loader_with_development() {
        let config = ConfigLoader::new().with_development().load().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.include_location);
    }

    #[test]
    fn test_loader_with_strict() {
        let config = ConfigLoader::new().with_strict().load().unwrap();
        assert_eq!(config.render.missing_input, MissingInput::Error);
    }

    #[test]
    fn test_loader_with_string_toml() {
        let toml = r#"
            [classify]
            malformed = "reject"
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.classify.malformed, MalformedAttributes::Reject);
        assert_eq!(config.render.receiver, "req");
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{ "render": { "missing_input": "error" } }"#;

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.render.missing_input, MissingInput::Error);
    }

    #[test]
    fn test_loader_with_string_unsupported_format() {
        let result = ConfigLoader::new().with_string("", "yaml");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_loader_unknown_field_rejected() {
        let result = ConfigLoader::new().with_string("[render]\nvariable = \"r\"", "toml");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_load_validates() {
        let result = ConfigLoader::new()
            .with_string("[render]\nreceiver = \"1req\"", "toml")
            .unwrap()
            .load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_unvalidated_skips_validation() {
        let config = ConfigLoader::new()
            .with_string("[logging]\nlevel = \"courier=loud\"", "toml")
            .unwrap()
            .load_unvalidated();
        assert_eq!(config.logging.level, "courier=loud");
    }

    #[test]
    fn test_load_accepts_filter_directive() {
        let config = ConfigLoader::new()
            .with_string("[logging]\nlevel = \"courier_codegen=debug,warn\"", "toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.logging.level, "courier_codegen=debug,warn");
    }

    #[test]
    fn test_loader_with_file_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[render]\nreceiver = \"request\"").unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.render.receiver, "request");
    }

    #[test]
    fn test_loader_with_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{ "logging": {{ "format": "json" }} }}"#).unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_loader_with_file_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_loader_file_not_found() {
        let result = ConfigLoader::new().with_file("/nonexistent/courier.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_loader_optional_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::new()
            .with_optional_file(dir.path().join(CONFIG_FILE_NAME))
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, CourierConfig::default());
    }

    #[test]
    fn test_env_var_render() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("COURIER__RENDER__RECEIVER", "request", "COURIER")
            .unwrap();
        loader
            .apply_env_var("COURIER__RENDER__MISSING_INPUT", "ERROR", "COURIER")
            .unwrap();
        let config = loader.load().unwrap();
        assert_eq!(config.render.receiver, "request");
        assert_eq!(config.render.missing_input, MissingInput::Error);
    }

    #[test]
    fn test_env_var_classify() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("COURIER__CLASSIFY__DUPLICATE_LABELS", "reject", "COURIER")
            .unwrap();
        assert_eq!(
            loader.load_unvalidated().classify.duplicate_labels,
            DuplicateLabels::Reject
        );
    }

    #[test]
    fn test_env_var_logging() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("COURIER__LOGGING__ENABLED", "off", "COURIER")
            .unwrap();
        loader
            .apply_env_var("COURIER__LOGGING__FORMAT", "json", "COURIER")
            .unwrap();
        let config = loader.load_unvalidated();
        assert!(!config.logging.enabled);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_var_invalid_value() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_env_var("COURIER__LOGGING__ENABLED", "maybe", "COURIER");
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[test]
    fn test_env_var_unknown_key() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_env_var("COURIER__RENDER__INDENT", "4", "COURIER");
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[test]
    fn test_env_var_foreign_key_ignored() {
        let mut loader = ConfigLoader::new();
        assert!(loader.apply_env_var("COURIER_HOME", "/tmp", "COURIER").is_ok());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
