//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Origin of the backend, without the API prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix for versioned API routes
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Where the bearer token is kept between runs.
    /// Defaults to `<config_dir>/novarch-admin/token`.
    pub token_file: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("novarch-admin").join("config.toml")),
            Some(PathBuf::from("./novarch-admin.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        // Logging is not yet initialized this early in
                        // startup; report straight to stderr.
                        eprintln!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NOVARCH_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(prefix) = std::env::var("NOVARCH_API_PREFIX") {
            self.api.api_prefix = prefix;
        }
        if let Ok(path) = std::env::var("NOVARCH_TOKEN_FILE") {
            self.auth.token_file = Some(PathBuf::from(path));
        }
        if let Ok(level) = std::env::var("NOVARCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NOVARCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Novarch Admin Configuration
#
# Environment variables override these settings:
# - NOVARCH_API_URL
# - NOVARCH_API_PREFIX
# - NOVARCH_TOKEN_FILE
# - NOVARCH_LOG_LEVEL
# - NOVARCH_LOG_FORMAT

[api]
# Backend origin (no API prefix)
base_url = "http://localhost:8000"

# Versioned API route prefix
api_prefix = "/api/v1"

# Request timeout in seconds
request_timeout_secs = 30

[auth]
# Where the bearer token is stored between runs
# token_file = "~/.config/novarch-admin/token"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.api_prefix, "/api/v1");
        assert!(config.auth.token_file.is_none());
    }

    #[test]
    fn parses_partial_config_file() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://novarch.example.org"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.api.base_url, "https://novarch.example.org");
        assert_eq!(config.api.api_prefix, "/api/v1", "prefix falls back to default");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn malformed_config_file_yields_parse_error() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "api = \"not a table\"").expect("write");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_config_file_yields_io_error() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let err = Config::load(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn generated_default_config_is_valid_toml() {
        let config: Config = toml::from_str(&generate_default_config()).expect("valid toml");
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }
}
