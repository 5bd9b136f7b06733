//! Configuration for the network monitor.
//!
//! Supports YAML configuration with precedence: CLI > file > defaults.

use crate::monitor::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest accepted sampling interval: one day.
pub const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Global configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Seconds between samples.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Input poll slice in milliseconds.
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,

    /// Directory snapshot files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// How long a reset/save confirmation stays on screen, in milliseconds.
    #[serde(default = "default_confirm_pause_ms")]
    pub confirm_pause_ms: u64,
}

fn default_interval_secs() -> u64 {
    15
}
fn default_poll_ms() -> u64 {
    100
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_confirm_pause_ms() -> u64 {
    1000
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            poll_ms: default_poll_ms(),
            output_dir: default_output_dir(),
            confirm_pause_ms: default_confirm_pause_ms(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global settings.
    #[serde(default)]
    pub global: GlobalConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            global: GlobalConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config_dir>/netmon/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("netmon").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| MonitorError::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// `ConfigInvalid` if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            MonitorError::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when the file is
    /// missing. A file that exists but is broken is still an error.
    ///
    /// # Errors
    ///
    /// Returns parse and validation errors from [`Config::load`].
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path) {
            Err(MonitorError::ConfigNotFound(missing)) => {
                log::debug!("no config at {missing}, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if self.global.interval_secs == 0 {
            return Err(MonitorError::ConfigInvalid {
                key: "interval_secs".to_string(),
                message: "must be at least 1 second".to_string(),
            });
        }
        if self.global.interval_secs > MAX_INTERVAL_SECS {
            return Err(MonitorError::ConfigInvalid {
                key: "interval_secs".to_string(),
                message: format!("must be at most {MAX_INTERVAL_SECS} seconds"),
            });
        }
        if self.global.poll_ms == 0 {
            return Err(MonitorError::ConfigInvalid {
                key: "poll_ms".to_string(),
                message: "must be at least 1 millisecond".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the sampling interval as a Duration.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.global.interval_secs)
    }

    /// Returns the input poll slice as a Duration.
    #[must_use]
    pub fn poll_slice(&self) -> Duration {
        Duration::from_millis(self.global.poll_ms)
    }

    /// Returns the confirmation pause as a Duration.
    #[must_use]
    pub fn confirm_pause(&self) -> Duration {
        Duration::from_millis(self.global.confirm_pause_ms)
    }
}
