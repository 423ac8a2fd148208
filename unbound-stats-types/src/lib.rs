//! # unbound-stats-types
//!
//! Core types shared between the Unbound statistics collector and the
//! agent-facing output layer.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to emit snapshots and
//!   graph definitions as JSON
//! - **Static schema**: Graph definitions are plain data, built once and compared freely
//!
//! ## Example
//!
//! ```rust
//! use unbound_stats_types::{GraphSpec, MetricSeriesSpec, MetricSnapshot, Unit};
//!
//! let snapshot: MetricSnapshot = [("queries".to_string(), 150.0)].into_iter().collect();
//!
//! let graph = GraphSpec::builder("num")
//!     .label("Unbound Traffics")
//!     .unit(Unit::Integer)
//!     .series(MetricSeriesSpec::new("queries", "Total queries from clients").diff(true))
//!     .build();
//!
//! assert_eq!(snapshot.get("queries"), Some(150.0));
//! assert_eq!(graph.metrics.len(), 1);
//! ```

mod graph;
mod snapshot;

pub use graph::*;
pub use snapshot::*;
