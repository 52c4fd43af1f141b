//! CLI configuration management

use ethkit_abi::{EmptyBytesPadding, EncoderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::CliError;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Padding of zero-length `bytes`/`string` values when encoding
    #[serde(default)]
    pub empty_bytes_padding: EmptyBytesPadding,
    /// Print JSON even without `--json`
    #[serde(default)]
    pub json_output: bool,
    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            empty_bytes_padding: EmptyBytesPadding::default(),
            json_output: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ethkit"))
    }

    /// Get the config file path, preferring an explicit override
    pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::config_dir().map(|d| d.join("config.toml")),
        }
    }

    /// Load config from file or return default.
    ///
    /// A missing file gives the default; an unreadable or malformed one is
    /// an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match Self::config_path(explicit) {
            Some(path) if path.exists() => path,
            _ => return Ok(Self::default()),
        };

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save config to file
    pub fn save(&self, explicit: Option<&Path>) -> Result<PathBuf, CliError> {
        let path = Self::config_path(explicit)
            .ok_or_else(|| CliError::Config("Cannot determine config path".to_string()))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Encoder options derived from this config
    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            empty_bytes_padding: self.empty_bytes_padding,
        }
    }
}
