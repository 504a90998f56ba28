use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Duration;
use tickboard::app;
use tickboard::config::{AppConfig, OutputMode};

/// tickboard - A board of ticking novelty counters
#[derive(Parser, Debug, Clone)]
#[command(name = "tickboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Counter to show first (e.g. --counter barks)
    #[arg(long = "counter", value_name = "ID")]
    counter: Option<String>,

    /// Start on a randomly chosen counter
    #[arg(short = 'r', long = "random")]
    random: bool,

    /// Switch to the next counter automatically every SECS seconds
    #[arg(long = "cycle", value_name = "SECS")]
    cycle: Option<f64>,

    /// Do not contact the population API; use the fallback figure
    #[arg(long = "offline")]
    offline: bool,

    /// Population API endpoint
    #[arg(long = "endpoint", value_name = "URL")]
    endpoint: Option<String>,

    /// Emit one JSON snapshot per line instead of the odometer
    #[arg(long = "json")]
    json: bool,

    /// List available counters and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

impl Cli {
    /// Command line flags take precedence over the config file
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(ref id) = self.counter {
            config.initial_counter = Some(id.clone());
        }
        if self.random {
            config.initial_counter = None;
            config.random_start = true;
        }
        if let Some(secs) = self.cycle {
            config.cycle_secs = Some(secs);
        }
        if self.offline {
            config.population.offline = true;
        }
        if let Some(ref url) = self.endpoint {
            config.population.endpoint = url.clone();
        }
        if self.json {
            config.output = OutputMode::Json;
        }
    }
}

fn load_config(cli: &Cli) -> AppConfig {
    if let Some(ref path) = cli.config {
        match AppConfig::load_from_path(path) {
            Ok(config) => {
                info!("Loaded config from: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config file '{}': {:#}", path.display(), e);
                // Fall back to default config
                AppConfig::load().unwrap_or_default()
            }
        }
    } else {
        match AppConfig::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config: {:#}", e);
                AppConfig::default()
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting tickboard v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(&cli);
    cli.apply_to(&mut config);
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    if cli.list {
        app::list_counters(&config);
        return;
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(app::run(config));

    // The stdin reader sits on a blocking thread; don't wait for it
    runtime.shutdown_timeout(Duration::from_millis(100));

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "tickboard", "--counter", "barks", "--cycle", "10", "--offline", "--json",
        ]);
        let mut config = AppConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.initial_counter.as_deref(), Some("barks"));
        assert_eq!(config.cycle_secs, Some(10.0));
        assert!(config.population.offline);
        assert_eq!(config.output, OutputMode::Json);
    }

    #[test]
    fn test_random_flag_clears_initial_counter() {
        let cli = Cli::parse_from(["tickboard", "--random"]);
        let mut config = AppConfig {
            initial_counter: Some("jello".to_string()),
            ..AppConfig::default()
        };
        cli.apply_to(&mut config);

        assert!(config.initial_counter.is_none());
        assert!(config.random_start);
    }
}
