//! Configuration management

mod settings;

pub use settings::{AppConfig, ConfigError, OutputMode, PopulationConfig, CONFIG_VERSION};
