//! Configuration module for podesk
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PODESK_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use podesk::config::PodeskConfig;
//!
//! // Load defaults
//! let config = PodeskConfig::default();
//! assert_eq!(config.api.base_url, "http://localhost:5000/api");
//!
//! // Parse from TOML
//! let toml = r#"
//! [api]
//! base_url = "https://po.example.com/api"
//! "#;
//! let config: PodeskConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.api.base_url, "https://po.example.com/api");
//! ```

pub mod api;
pub mod error;
pub mod logging;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

// Re-export WakeConfig from the status module
pub use crate::status::WakeConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unified configuration for the podesk client.
///
/// Aggregates the API endpoint, wake-cycle tuning, state directory, and
/// logging sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PodeskConfig {
    /// Backend endpoint configuration
    pub api: ApiConfig,
    /// Wake-cycle resilience tuning
    pub wake: WakeConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Directory for persisted client state (session, wakefulness mark).
    /// Defaults to the per-user data directory.
    pub state_dir: Option<PathBuf>,
}

impl PodeskConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports PODESK_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PODESK_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("PODESK_API_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.api.timeout_seconds = t;
            }
        }

        if let Ok(level) = std::env::var("PODESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PODESK_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(dir) = std::env::var("PODESK_STATE_DIR") {
            self.state_dir = Some(PathBuf::from(dir));
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "api.base_url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Validation {
                field: "api.base_url".to_string(),
                message: "URL must start with http:// or https://".to_string(),
            });
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        if self.wake.probe_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "wake.probe_timeout_seconds".to_string(),
                message: "probe timeout must be non-zero".to_string(),
            });
        }
        if self.wake.poll_interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "wake.poll_interval_seconds".to_string(),
                message: "poll interval must be non-zero".to_string(),
            });
        }
        if self.wake.recheck_after_seconds >= self.wake.max_wait_seconds {
            return Err(ConfigError::Validation {
                field: "wake.recheck_after_seconds".to_string(),
                message: "recheck threshold must be below max_wait_seconds".to_string(),
            });
        }

        Ok(())
    }
}
