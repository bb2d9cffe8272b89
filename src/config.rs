// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Runtime configuration: where the PWM class lives and how long to wait
//! for an exported channel to appear.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default location of the sysfs PWM class.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/pwm";

/// Environment variable overriding [`PwmConfig::sysfs_root`].
pub const SYSFS_ROOT_ENV: &str = "SYSFSPWM_ROOT";

/// Bounded polling applied after writing a chip's `export` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportPolicy {
    /// Number of existence checks before giving up.
    pub attempts: u32,
    /// Delay preceding each check, in milliseconds.
    pub interval_ms: u64,
}

impl ExportPolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            attempts: 20,
            interval_ms: 100,
        }
    }
}

/// PWM access configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PwmConfig {
    /// Directory containing the `pwmchip<N>` entries.
    pub sysfs_root: PathBuf,
    pub export: ExportPolicy,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            export: ExportPolicy::default(),
        }
    }
}

impl PwmConfig {
    /// Defaults, with the root taken from `SYSFSPWM_ROOT` when set.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(root) = std::env::var_os(SYSFS_ROOT_ENV) {
            cfg.sysfs_root = PathBuf::from(root);
        }
        cfg
    }
}

/// Errors produced while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config TOML in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Load and validate a TOML configuration. Missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<PwmConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    let cfg = parse_config(&text).map_err(|source| ConfigError::Toml {
        path: path.to_owned(),
        source,
    })?;
    validate_config(&cfg)?;
    Ok(cfg)
}

fn parse_config(text: &str) -> Result<PwmConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Check the invariants the export poll and path resolution rely on.
pub fn validate_config(cfg: &PwmConfig) -> Result<(), ConfigError> {
    if !cfg.sysfs_root.is_absolute() {
        return Err(ConfigError::Invalid(format!(
            "sysfs_root {} must be absolute",
            cfg.sysfs_root.display()
        )));
    }
    if cfg.export.attempts == 0 {
        return Err(ConfigError::Invalid("export.attempts must be >= 1".into()));
    }
    if cfg.export.interval_ms == 0 {
        return Err(ConfigError::Invalid("export.interval_ms must be >= 1".into()));
    }
    Ok(())
}
