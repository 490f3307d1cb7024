use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "MYWEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// User settings file location
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Which weather source backs the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// QWeather HTTP API
    #[default]
    QWeather,
    /// Randomly generated readings, no network access
    Demo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// QWeather API credential
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the v7 API (both `weather/now` and `weather/24h` live under it)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Response language; "en" or "zh"
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://devapi.qweather.com/v7".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: String::new(),
            base_url: default_base_url(),
            lang: default_lang(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Override for the user settings file; defaults to the config directory
    pub path: Option<PathBuf>,
}

impl Config {
    /// Directory holding `config.toml` and `user_settings.json`
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("myweather");
        Ok(dir)
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_dir()?.join("config.toml");
        Self::load_from(&path)
    }

    /// Load configuration from `path`, writing the default there if missing.
    ///
    /// `MYWEATHER_API_KEY` takes precedence over the stored key.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            config
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.weather.api_key = key;
            }
        }

        Ok(config)
    }

    /// Validate a loaded (and possibly overridden) configuration
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn into_validated(self) -> Result<(Self, ValidationResult)> {
        let validation = self.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.weather.provider == ProviderKind::QWeather {
            self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

            if self.weather.api_key.trim().is_empty() {
                result.add_warning(
                    "weather.api_key",
                    format!(
                        "No API key configured (set it here or via {}); every fetch will show defaults",
                        API_KEY_ENV
                    ),
                );
            }
        }

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        } else if self.weather.timeout_secs > 120 {
            result.add_warning(
                "weather.timeout_secs",
                "Timeout is unusually long (>120s); the display blocks while fetching",
            );
        }

        if !matches!(self.weather.lang.as_str(), "en" | "zh") {
            result.add_warning(
                "weather.lang",
                format!(
                    "Language '{}' may return descriptions without a recognizable rain marker",
                    self.weather.lang
                ),
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Where user settings live: the configured override, else the config directory
    pub fn settings_path(&self) -> Result<PathBuf> {
        match &self.settings.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("user_settings.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_missing_api_key_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_demo_provider_skips_network_checks() {
        let mut config = Config::default();
        config.weather.provider = ProviderKind::Demo;
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_demo_override_validates_despite_bad_network_settings() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        assert!(config.clone().into_validated().is_err());

        config.weather.provider = ProviderKind::Demo;
        let (config, validation) = config.into_validated().unwrap();

        assert_eq!(config.weather.provider, ProviderKind::Demo);
        assert!(validation.is_valid());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.base_url = "ftp://devapi.qweather.com/v7".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.weather.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.error_summary().contains("weather.timeout_secs"));
    }

    #[test]
    fn test_load_from_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.weather.provider, ProviderKind::QWeather);
    }

    #[test]
    fn test_load_from_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\nprovider = \"demo\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.weather.provider, ProviderKind::Demo);
        assert_eq!(config.weather.base_url, "https://devapi.qweather.com/v7");
        assert_eq!(config.weather.lang, "en");
        assert!(config.settings.path.is_none());
    }

    #[test]
    fn test_load_from_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\nprovider = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_settings_path_override() {
        let mut config = Config::default();
        config.settings.path = Some(PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.settings_path().unwrap(), PathBuf::from("/tmp/prefs.json"));
    }
}
