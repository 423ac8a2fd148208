//! Plugin settings.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional settings file (TOML, YAML or JSON, by extension)
//! 3. `UNBOUND_STATS_*` environment variables
//! 4. command-line flags
//!
//! ```toml
//! command_path = "/usr/local/sbin/unbound-control"
//! conf_path = "/etc/unbound/unbound.conf"
//! prefix = "unbound"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use unbound_stats_adapter::control::DEFAULT_COMMAND_PATH;
use unbound_stats_adapter::DEFAULT_PREFIX;

/// Environment variable prefix for settings.
pub const ENV_PREFIX: &str = "UNBOUND_STATS";

/// Resolved plugin settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Path of `unbound-control`.
    pub command_path: PathBuf,
    /// Unbound configuration file passed to `unbound-control -c`.
    #[serde(default)]
    pub conf_path: Option<PathBuf>,
    /// Metric key prefix.
    pub prefix: String,
    /// Agent persisted-state file, passed through untouched.
    #[serde(default)]
    pub tempfile: Option<PathBuf>,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub command_path: Option<PathBuf>,
    pub conf_path: Option<PathBuf>,
    pub prefix: Option<String>,
    pub tempfile: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command_path: PathBuf::from(DEFAULT_COMMAND_PATH),
            conf_path: None,
            prefix: DEFAULT_PREFIX.to_string(),
            tempfile: None,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment,
    /// then apply command-line overrides.
    pub fn load(settings_file: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("command_path", DEFAULT_COMMAND_PATH)?
            .set_default("prefix", DEFAULT_PREFIX)?;

        if let Some(path) = settings_file {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings.apply(overrides))
    }

    /// Apply command-line overrides on top of these settings.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(command_path) = overrides.command_path {
            self.command_path = command_path;
        }
        if overrides.conf_path.is_some() {
            self.conf_path = overrides.conf_path;
        }
        if let Some(prefix) = overrides.prefix {
            self.prefix = prefix;
        }
        if overrides.tempfile.is_some() {
            self.tempfile = overrides.tempfile;
        }
        // An empty path means no Unbound configuration file.
        self.conf_path = self.conf_path.filter(|p| !p.as_os_str().is_empty());
        self
    }
}
