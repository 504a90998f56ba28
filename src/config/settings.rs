//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tickboard_core::{tick_period, CounterTemplate};
use tickboard_sources::{DEFAULT_FETCH_TIMEOUT, DEFAULT_POPULATION_ENDPOINT};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Settings that make no sense even though they parse
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cycle interval must be between 1ns and one year in seconds, got {0}")]
    InvalidCycle(f64),
    #[error("population timeout must be greater than zero")]
    ZeroTimeout,
}

/// How counter updates are written to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Human-readable odometer line
    #[default]
    Text,
    /// One JSON snapshot per line
    Json,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_endpoint() -> String {
    DEFAULT_POPULATION_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_millis() as u64
}

/// Where the population seed comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Skip the request and use the fallback figure
    #[serde(default)]
    pub offline: bool,
}

impl PopulationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            offline: false,
        }
    }
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub population: PopulationConfig,
    /// Counter shown first (first counter of the board if unset or unknown)
    #[serde(default)]
    pub initial_counter: Option<String>,
    /// Start on a randomly chosen counter when no initial counter is set
    #[serde(default)]
    pub random_start: bool,
    /// Switch to the next counter automatically every this many seconds
    #[serde(default)]
    pub cycle_secs: Option<f64>,
    #[serde(default)]
    pub output: OutputMode,
    /// User-defined counters appended after the built-in ones
    #[serde(default)]
    pub extra_counters: Vec<CounterTemplate>,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "github.tickboard", "tickboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(secs) = self.cycle_secs {
            if tick_period(secs).is_none() {
                return Err(ConfigError::InvalidCycle(secs));
            }
        }
        if self.population.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Auto-cycle period; `None` when cycling is off or the value is unusable
    pub fn cycle_interval(&self) -> Option<Duration> {
        self.cycle_secs.and_then(tick_period)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            population: PopulationConfig::default(),
            initial_counter: None,
            random_start: false,
            cycle_secs: None,
            output: OutputMode::Text,
            extra_counters: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickboard_core::ValueSeed;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.population.timeout(), DEFAULT_FETCH_TIMEOUT);
        assert!(config.cycle_interval().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.initial_counter = Some("barks".to_string());
        config.cycle_secs = Some(30.0);
        config.output = OutputMode::Json;
        config.extra_counters.push(CounterTemplate::new(
            "coffee",
            "Coffees",
            "(Today)",
            ValueSeed::Fixed { value: 2.0 },
        ));

        config.save_to_path(&path).unwrap();
        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_bad_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"cycle_secs": 0}"#).unwrap();

        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("cycle interval"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from_path(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.cycle_secs = Some(-3.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidCycle(-3.0)));

        config.cycle_secs = None;
        config.population.timeout_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_cycle_must_make_a_timer_period() {
        let mut config = AppConfig::default();
        for secs in [1e-10, 1e300, f64::NAN] {
            config.cycle_secs = Some(secs);
            assert!(matches!(config.validate(), Err(ConfigError::InvalidCycle(_))));
            assert_eq!(config.cycle_interval(), None);
        }

        config.cycle_secs = Some(2.5);
        assert!(config.validate().is_ok());
        assert_eq!(config.cycle_interval(), Some(Duration::from_millis(2_500)));
    }
}
