//! Command-line arguments for the council front end.
//!
//! Priority: CLI flags > `COUNCIL_CONFIG` > config file > defaults.

use camino::Utf8PathBuf;
use clap::Parser;
use council::config::CouncilConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "COUNCIL_CONFIG";
/// Configuration file used when neither flag nor environment names one.
pub const DEFAULT_CONFIG_FILE: &str = "council.toml";

/// Talk to a council of command-line AI advisors.
#[derive(Parser, Debug, Default)]
#[command(name = "council", version, about)]
pub struct CliArgs {
    /// Path to the TOML configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<Utf8PathBuf>,

    /// Root directory for the advisor registry and history.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<Utf8PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolves the configuration file path.
    #[must_use]
    pub fn config_path(&self, env_value: Option<String>) -> Utf8PathBuf {
        self.config
            .clone()
            .or_else(|| {
                env_value
                    .filter(|value| !value.trim().is_empty())
                    .map(Utf8PathBuf::from)
            })
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Applies flag overrides on top of a loaded configuration.
    #[must_use]
    pub fn apply(&self, mut config: CouncilConfig) -> CouncilConfig {
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.to_string();
        }
        if let Some(level) = &self.log_level {
            config.log_level.clone_from(level);
        }
        config
    }

    /// Loads the configuration this invocation asks for.
    #[must_use]
    pub fn resolve_config(&self) -> (Utf8PathBuf, CouncilConfig) {
        let path = self.config_path(std::env::var(CONFIG_ENV).ok());
        let config = self.apply(CouncilConfig::load_or_default(&path));
        (path, config)
    }
}
