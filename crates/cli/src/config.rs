//! Watcher configuration
//!
//! Loaded from a JSON document, then layered with `DIRWATCH_*` environment
//! variables and finally command line overrides.

use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use watcher::WatchError;

/// Default location of the configuration document
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "DIRWATCH";

const MIN_INTERVAL_MS: u64 = 1;
const MAX_INTERVAL_MS: u64 = 3_600_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchConfig {
    /// Directory to monitor
    pub watch_directory: PathBuf,

    /// Wait between iterations (default: 1000ms)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Gitignore-style patterns for filenames that are never tracked
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Values given on the command line, taking precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub watch_directory: Option<PathBuf>,
    pub poll_interval_ms: Option<u64>,
}

impl WatchConfig {
    /// Polling interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.watch_directory {
            self.watch_directory = dir.clone();
        }
        if let Some(ms) = overrides.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
    }

    /// Check ranges that deserialization cannot express
    pub fn validate(&self) -> Result<(), WatchError> {
        if self.watch_directory.as_os_str().is_empty() {
            return Err(invalid("watch_directory must not be empty"));
        }

        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(invalid(format!(
                "poll_interval_ms must be between {} and {} (got {})",
                MIN_INTERVAL_MS, MAX_INTERVAL_MS, self.poll_interval_ms
            )));
        }

        Ok(())
    }
}

/// Load the configuration document at `path` with environment overrides
pub fn load(path: &Path) -> Result<WatchConfig, WatchError> {
    load_with_env(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
}

/// Load, apply command line overrides and validate
pub fn resolve(path: &Path, overrides: &Overrides) -> Result<WatchConfig, WatchError> {
    let mut config = load(path)?;
    config.apply(overrides);
    config.validate()?;
    Ok(config)
}

fn load_with_env(path: &Path, env: Environment) -> Result<WatchConfig, WatchError> {
    if !path.is_file() {
        return Err(invalid(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    let settings = Config::builder()
        .add_source(File::from(path).format(FileFormat::Json))
        .add_source(env)
        .build()
        .map_err(|e| invalid(format!("failed to parse {}: {}", path.display(), e)))?;

    settings
        .try_deserialize::<WatchConfig>()
        .map_err(|e| invalid(format!("{}: {}", path.display(), e)))
}

fn invalid(reason: impl Into<String>) -> WatchError {
    WatchError::ConfigInvalid {
        reason: reason.into(),
    }
}
