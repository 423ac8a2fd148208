//! The plugin: a stats source bound to a metric key prefix.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use unbound_stats_adapter::schema::effective_prefix;
use unbound_stats_adapter::{graph_definition, FetchError, StatsSource, UnboundControl};
use unbound_stats_types::{GraphSpec, MetricSnapshot};

use crate::config::Settings;

/// Result of a single collection cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Unix timestamp in seconds when the snapshot was taken.
    pub timestamp: u64,
    /// Raw counters.
    pub snapshot: MetricSnapshot,
}

/// Collects Unbound statistics for the monitoring agent.
///
/// # Example
///
/// ```
/// use unbound_stats::UnboundPlugin;
/// use unbound_stats_adapter::FixtureSource;
///
/// let plugin = UnboundPlugin::new(Box::new(FixtureSource::new("total.num.queries=150\n")), "unbound");
/// let collection = plugin.collect().unwrap();
/// assert_eq!(collection.snapshot.get("queries"), Some(150.0));
/// ```
#[derive(Debug)]
pub struct UnboundPlugin {
    source: Box<dyn StatsSource>,
    prefix: String,
    state_file: Option<PathBuf>,
}

impl UnboundPlugin {
    /// Create a plugin reading from the given source.
    pub fn new(source: Box<dyn StatsSource>, prefix: impl Into<String>) -> Self {
        Self {
            source,
            prefix: prefix.into(),
            state_file: None,
        }
    }

    /// Create a plugin that runs `unbound-control` as configured.
    pub fn from_settings(settings: &Settings) -> Self {
        let control = UnboundControl::builder()
            .command_path(&settings.command_path)
            .maybe_conf_path(settings.conf_path.clone())
            .build();

        Self::new(Box::new(control), settings.prefix.clone())
            .with_state_file(settings.tempfile.clone())
    }

    /// Attach the agent's persisted-state path. It is carried, never read.
    pub fn with_state_file(mut self, path: Option<PathBuf>) -> Self {
        self.state_file = path;
        self
    }

    /// Prefix for every metric key, defaulting to `unbound`.
    pub fn metric_key_prefix(&self) -> &str {
        effective_prefix(&self.prefix)
    }

    /// Persisted-state path for the agent, if one was given.
    pub fn state_file(&self) -> Option<&Path> {
        self.state_file.as_deref()
    }

    /// Description of the underlying source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Graph definitions for this plugin's prefix.
    pub fn graph_definition(&self) -> Vec<GraphSpec> {
        graph_definition(self.metric_key_prefix())
    }

    /// Fetch raw counters from the source.
    pub fn fetch_metrics(&self) -> Result<MetricSnapshot, FetchError> {
        self.source.fetch()
    }

    /// Fetch raw counters and stamp them with the current time.
    pub fn collect(&self) -> Result<Collection, FetchError> {
        let snapshot = self.fetch_metrics()?;
        Ok(Collection {
            timestamp: current_timestamp(),
            snapshot,
        })
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
