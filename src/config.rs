//! Configuration management for Weatherwise
//!
//! Handles loading configuration from files and environment variables,
//! and validates the result before the service starts.

use crate::WeatherwiseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for Weatherwise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherwiseConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider API key
    pub api_key: Option<String>,
    /// Base URL of the provider API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
    /// Retries for transient failures, handled by the retry middleware
    #[serde(default = "default_provider_max_retries")]
    pub max_retries: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_provider_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_provider_timeout() -> u32 {
    10
}

fn default_provider_max_retries() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_provider_base_url(),
            timeout_seconds: default_provider_timeout(),
            max_retries: default_provider_max_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl WeatherwiseConfig {
    /// Load configuration from the given file, or the default location,
    /// overlaid with environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERWISE__PROVIDER__API_KEY, WEATHERWISE__SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("WEATHERWISE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherwiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.provider.api_key.is_none() {
            config.provider.api_key = std::env::var("WEATHER_API_KEY").ok();
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherwise").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.provider.base_url.is_empty() {
            self.provider.base_url = default_provider_base_url();
        }
        if self.provider.timeout_seconds == 0 {
            self.provider.timeout_seconds = default_provider_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The provider rejects every request without a key, so it is mandatory
    pub fn validate_api_key(&self) -> Result<()> {
        match &self.provider.api_key {
            None => Err(WeatherwiseError::config(
                "Weather provider API key is missing. Set WEATHER_API_KEY or provider.api_key.",
            )
            .into()),
            Some(key) if key.trim().is_empty() => Err(WeatherwiseError::config(
                "Weather provider API key cannot be empty.",
            )
            .into()),
            Some(key) if key.len() > 100 => Err(WeatherwiseError::config(
                "Weather provider API key appears to be invalid (too long).",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.provider.timeout_seconds > 120 {
            return Err(
                WeatherwiseError::config("Provider timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.provider.max_retries > 10 {
            return Err(WeatherwiseError::config("Provider max retries cannot exceed 10").into());
        }

        if self.server.port == 0 {
            return Err(WeatherwiseError::config("Server port must be non-zero").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherwiseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherwiseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(WeatherwiseError::config(
                "Provider base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> WeatherwiseConfig {
        let mut config = WeatherwiseConfig::default();
        config.provider.api_key = Some("valid_api_key_123".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = WeatherwiseConfig::default();
        assert_eq!(config.provider.base_url, "https://api.weatherapi.com/v1");
        assert_eq!(config.provider.timeout_seconds, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        let config = WeatherwiseConfig::default();
        let result = config.validate_api_key();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key is missing"));
    }

    #[test]
    fn test_config_validation_valid_api_key() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = valid_config();
        config.provider.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = valid_config();
        config.provider.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = valid_config();
        config.provider.base_url.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.provider.base_url, "https://api.weatherapi.com/v1");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WeatherwiseConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherwise"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
