//! # unbound-stats-adapter
//!
//! Collects runtime statistics from an Unbound DNS resolver and describes
//! how they should be graphed.
//!
//! - [`parse_stats`] turns `unbound-control stats_noreset` output into a
//!   [`MetricSnapshot`]
//! - [`UnboundControl`] runs the control tool and streams its output into
//!   the parser
//! - [`graph_definition`] declares the graphs and per-series rendering
//!   semantics for a metric key prefix
//!
//! Counters are reported raw. Series marked `diff` are cumulative and the
//! consumer is expected to compute deltas between snapshots.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unbound_stats_adapter::{graph_definition, StatsSource, UnboundControl};
//!
//! let control = UnboundControl::builder().build();
//! let snapshot = control.fetch()?;
//!
//! for graph in graph_definition("unbound") {
//!     for series in &graph.metrics {
//!         println!("{}: {:?}", series.label, snapshot.get(&series.name));
//!     }
//! }
//! # Ok::<(), unbound_stats_adapter::FetchError>(())
//! ```

pub mod control;
pub mod error;
pub mod parser;
pub mod schema;
pub mod source;

pub use control::{UnboundControl, UnboundControlBuilder};
pub use error::{FetchError, ParseError};
pub use parser::parse_stats;
pub use schema::{graph_definition, DEFAULT_PREFIX};
pub use source::{FixtureSource, StatsSource};

// Re-export types for convenience
pub use unbound_stats_types::{GraphSpec, MetricSeriesSpec, MetricSnapshot, Unit};
