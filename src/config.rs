use crate::classify::Thresholds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_warning_percent")]
    pub warning_percent: f64,
    #[serde(default = "default_critical_percent")]
    pub critical_percent: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "default_mount_table")]
    pub mount_table: PathBuf,
    #[serde(default = "default_device_prefixes")]
    pub device_prefixes: Vec<String>,
    #[serde(default = "default_meminfo")]
    pub meminfo: PathBuf,
    #[serde(default = "default_cpuinfo")]
    pub cpuinfo: PathBuf,
    #[serde(default = "default_os_release")]
    pub os_release: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: ThresholdsConfig::default(),
            sources: SourcesConfig::default(),
            command_timeout_ms: default_command_timeout_ms(),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            warning_percent: default_warning_percent(),
            critical_percent: default_critical_percent(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            mount_table: default_mount_table(),
            device_prefixes: default_device_prefixes(),
            meminfo: default_meminfo(),
            cpuinfo: default_cpuinfo(),
            os_release: default_os_release(),
        }
    }
}

impl From<&ThresholdsConfig> for Thresholds {
    fn from(value: &ThresholdsConfig) -> Self {
        Self {
            warning: value.warning_percent,
            critical: value.critical_percent,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    /// Loads `path` when given, otherwise returns the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_thresholds(&self.thresholds)?;
        validate_sources(&self.sources)?;
        if self.command_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "command_timeout_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from(&self.thresholds)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn validate_thresholds(cfg: &ThresholdsConfig) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&cfg.warning_percent) {
        return Err(ConfigError::Validation(
            "thresholds.warning_percent must be in range 0..100".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&cfg.critical_percent) {
        return Err(ConfigError::Validation(
            "thresholds.critical_percent must be in range 0..100".to_string(),
        ));
    }
    if cfg.warning_percent > cfg.critical_percent {
        return Err(ConfigError::Validation(format!(
            "thresholds.warning_percent ({}) must not exceed thresholds.critical_percent ({})",
            cfg.warning_percent, cfg.critical_percent
        )));
    }
    Ok(())
}

fn validate_sources(cfg: &SourcesConfig) -> Result<(), ConfigError> {
    if cfg.device_prefixes.is_empty() {
        return Err(ConfigError::Validation(
            "sources.device_prefixes must not be empty".to_string(),
        ));
    }
    if cfg.device_prefixes.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "sources.device_prefixes[*] must not be blank".to_string(),
        ));
    }
    Ok(())
}

const fn default_warning_percent() -> f64 {
    80.0
}

const fn default_critical_percent() -> f64 {
    95.0
}

const fn default_command_timeout_ms() -> u64 {
    10_000
}

fn default_mount_table() -> PathBuf {
    PathBuf::from("/proc/mounts")
}

fn default_device_prefixes() -> Vec<String> {
    vec!["/dev/".to_string()]
}

fn default_meminfo() -> PathBuf {
    PathBuf::from("/proc/meminfo")
}

fn default_cpuinfo() -> PathBuf {
    PathBuf::from("/proc/cpuinfo")
}

fn default_os_release() -> PathBuf {
    PathBuf::from("/etc/os-release")
}
