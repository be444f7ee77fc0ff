//! API endpoint configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the purchase-order backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API, including any path prefix.
    pub base_url: String,
    /// Timeout for ordinary API requests. Health probes have their own,
    /// much shorter budget in [`crate::status::WakeConfig`].
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
