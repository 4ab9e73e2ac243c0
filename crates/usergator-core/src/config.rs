//! Configuration management for usergator.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Smallest accepted concurrency limit.
pub const MIN_CONCURRENCY: usize = 1;

/// Largest accepted concurrency limit.
pub const MAX_CONCURRENCY: usize = 64;

/// Main application configuration.
///
/// This is loaded from `~/.config/usergator/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Probe engine settings
    pub probe: ProbeConfig,
    /// Site list settings
    pub sites: SitesConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `USERGATOR_CONCURRENCY`: Override probe concurrency
    /// - `USERGATOR_TIMEOUT_SECS`: Override per-request timeout
    /// - `USERGATOR_SITES_FILE`: Override the site list file
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Values that fail to parse are ignored and the configured value is kept.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("USERGATOR_CONCURRENCY") {
            if let Ok(concurrency) = val.parse() {
                self.probe.concurrency = concurrency;
                tracing::debug!("Override probe.concurrency from env: {}", concurrency);
            }
        }

        if let Some(val) = lookup("USERGATOR_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.probe.timeout_secs = secs;
                tracing::debug!("Override probe.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("USERGATOR_SITES_FILE") {
            if !val.is_empty() {
                tracing::debug!("Override sites.file from env: {}", val);
                self.sites.file = Some(PathBuf::from(val));
            }
        }
    }

    /// Check that every value is within its accepted range.
    pub fn validate(&self) -> ConfigResult<()> {
        self.probe.validate()
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/usergator/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "usergator", "usergator").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// How a completed exchange with an unexpected status is classified.
///
/// `404` and the `200..400` success band are always classified the same way;
/// this only decides the fate of every other status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnexpectedStatus {
    /// Treat the profile as absent
    #[default]
    Absent,
    /// Treat presence as unknown and keep the status for inspection
    Unknown,
}

/// Probe engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Maximum number of probes in flight at once
    pub concurrency: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum redirect hops followed per request
    pub max_redirects: usize,
    /// User-Agent header sent with every probe
    pub user_agent: String,
    /// Classification of statuses outside 404 and the success band
    pub unexpected_status: UnexpectedStatus,
    /// Optional deadline for a whole batch, in seconds
    pub overall_deadline_secs: Option<u64>,
}

impl ProbeConfig {
    /// Per-request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Batch deadline as a `Duration`, if configured.
    #[must_use]
    pub fn overall_deadline(&self) -> Option<Duration> {
        self.overall_deadline_secs.map(Duration::from_secs)
    }

    /// Check that probe settings are within their accepted ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&self.concurrency) {
            return Err(ConfigError::InvalidValue {
                field: "probe.concurrency".to_string(),
                reason: format!(
                    "must be {MIN_CONCURRENCY}-{MAX_CONCURRENCY}, got {}",
                    self.concurrency
                ),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.max_redirects == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe.max_redirects".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.overall_deadline_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "probe.overall_deadline_secs".to_string(),
                reason: "must be greater than zero when set".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout_secs: 10,
            max_redirects: 10,
            user_agent: format!(
                "usergator/{} (respectful OSINT checker)",
                env!("CARGO_PKG_VERSION")
            ),
            unexpected_status: UnexpectedStatus::default(),
            overall_deadline_secs: None,
        }
    }
}

/// Site list settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    /// TOML site list replacing the built-in table
    pub file: Option<PathBuf>,
}
