// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ApiError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Plain environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    ///
    /// CLI overrides are applied by the caller afterwards.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(str::to_string)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&path).required(config_path.is_some()))
            // Override with environment variables (e.g. PLANTDOC_SERVER__PORT)
            .add_source(
                Environment::with_prefix("PLANTDOC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        if app_config.gemini.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                app_config.gemini.api_key = key;
            }
        }

        Ok(app_config)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(ApiError::Config(format!(
                "Gemini API key not found. Set {} in the environment or a .env file.",
                API_KEY_ENV
            )));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ApiError::Config(
                "server.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.gemini.timeout_seconds == 0 {
            return Err(ApiError::Config(
                "gemini.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".plantdoc")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_requires_api_key() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_validate_accepts_configured_key() {
        let mut config = AppConfig::default();
        config.gemini.api_key = "test-key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_upload_limit() {
        let mut config = AppConfig::default();
        config.gemini.api_key = "test-key".to_string();
        config.server.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.gemini.api_key = "test-key".to_string();
        config.gemini.timeout_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[gemini]\napi_key = \"file-key\"\nmodel = \"gemini-test\""
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.api_key, "file-key");
        assert_eq!(config.gemini.model, "gemini-test");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some("/nonexistent/plantdoc.toml")).is_err());
    }
}
