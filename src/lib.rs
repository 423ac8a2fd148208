//! # unbound-stats
//!
//! A monitoring-agent plugin reporting statistics from an Unbound DNS
//! resolver.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   stats_noreset   ┌──────────────┐
//! │ unbound-      │──────────────────▶│ parse_stats  │
//! │ control       │      stdout       │              │
//! └───────────────┘                   └──────┬───────┘
//!                                            │ MetricSnapshot
//!                                            ▼
//! ┌───────────────┐                   ┌──────────────┐
//! │ graph         │──────────────────▶│ output       │──▶ agent
//! │ definition    │    GraphSpec      │              │
//! └───────────────┘                   └──────────────┘
//! ```
//!
//! - **[`plugin`]**: [`UnboundPlugin`] binds a [`StatsSource`] to a metric
//!   key prefix
//! - **[`output`]**: the agent's text protocol for values and graph metadata
//! - **[`config`]**: layered [`Settings`]
//!
//! Counters are reported raw. Computing rates for series marked `diff` is
//! left to the agent, which also owns the persisted-state file.
//!
//! ## Usage
//!
//! ```bash
//! # Report counters
//! unbound-stats --path /usr/sbin/unbound-control --conf /etc/unbound/unbound.conf
//!
//! # Report graph definitions
//! MACKEREL_AGENT_PLUGIN_META=1 unbound-stats
//! ```
//!
//! ### As a library
//!
//! ```
//! use unbound_stats::{output, UnboundPlugin};
//! use unbound_stats_adapter::FixtureSource;
//!
//! let source = FixtureSource::new("total.num.queries=150\n");
//! let plugin = UnboundPlugin::new(Box::new(source), "unbound");
//!
//! let collection = plugin.collect().unwrap();
//! let mut out = Vec::new();
//! output::write_values(&mut out, plugin.metric_key_prefix(), &plugin.graph_definition(), &collection).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("unbound.num.queries\t150\t"));
//! ```

pub mod config;
pub mod output;
pub mod plugin;

// Re-export main types for convenience
pub use crate::config::{Overrides, Settings};
pub use crate::plugin::{Collection, UnboundPlugin};
pub use unbound_stats_adapter::{FetchError, ParseError, StatsSource};
pub use unbound_stats_types::{GraphSpec, MetricSeriesSpec, MetricSnapshot, Unit};
