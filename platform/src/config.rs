//! Platform configuration with TOML file support.

use agora_governance::GovernanceParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::logging::LogFormat;
use crate::PlatformError;

/// Configuration for an Agora platform.
///
/// Can be loaded from a TOML file via [`PlatformConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Members the deployer admits before ownership passes to governance.
    #[serde(default = "default_founding_members")]
    pub founding_members: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Quorum policy.
    #[serde(default)]
    pub governance: GovernanceParams,
}

fn default_founding_members() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl PlatformConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PlatformError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PlatformError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PlatformError> {
        toml::from_str(s).map_err(|e| PlatformError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, PlatformError> {
        toml::to_string_pretty(self).map_err(|e| PlatformError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.founding_members == 0 {
            return Err(PlatformError::Config(
                "founding_members must be at least 1".into(),
            ));
        }
        self.governance
            .validate()
            .map_err(|e| PlatformError::Config(e.to_string()))
    }

    /// Install the global subscriber described by `log_format` and `log_level`.
    pub fn init_logging(&self) {
        crate::logging::init_logging(self.log_format, &self.log_level);
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            founding_members: default_founding_members(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            governance: GovernanceParams::default(),
        }
    }
}
