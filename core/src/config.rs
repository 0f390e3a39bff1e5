//! Console configuration
//!
//! Persisted via confy as TOML under the platform config directory
//! (`carillon/config.toml`). The appliance address can be overridden per
//! invocation with `--url` without touching the stored file.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

const APP_NAME: &str = "carillon";
const CONFIG_NAME: &str = "config";

/// Appliance address used when nothing is configured.
pub const DEFAULT_APPLIANCE_URL: &str = "http://127.0.0.1:7777";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the appliance (scheme + host + port).
    pub appliance_url: String,
    /// Per-request timeout in seconds for everything except uploads.
    pub request_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            appliance_url: DEFAULT_APPLIANCE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConsoleConfig {
    /// Loads the stored configuration, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|err| {
            warn!(error = %err, "could not load configuration, using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Where confy keeps the file, for display in the console.
    pub fn path() -> Result<std::path::PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_appliance() {
        let config = ConsoleConfig::default();
        assert_eq!(config.appliance_url, DEFAULT_APPLIANCE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = ConsoleConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
