//! Graph definitions - how raw counters are grouped and rendered.

/// Unit a graph's values are expressed in.
///
/// Matches the unit vocabulary understood by the monitoring agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[cfg_attr(feature = "serde", serde(rename = "float"))]
    #[default]
    Float,
    #[cfg_attr(feature = "serde", serde(rename = "integer"))]
    Integer,
    #[cfg_attr(feature = "serde", serde(rename = "percentage"))]
    Percentage,
    #[cfg_attr(feature = "serde", serde(rename = "bytes"))]
    Bytes,
    #[cfg_attr(feature = "serde", serde(rename = "bytes/sec"))]
    BytesPerSecond,
    #[cfg_attr(feature = "serde", serde(rename = "iops"))]
    Iops,
}

impl Unit {
    /// The unit's name as the agent spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Float => "float",
            Unit::Integer => "integer",
            Unit::Percentage => "percentage",
            Unit::Bytes => "bytes",
            Unit::BytesPerSecond => "bytes/sec",
            Unit::Iops => "iops",
        }
    }
}

/// One named series within a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSeriesSpec {
    /// Metric name, matching a key in [`MetricSnapshot`](crate::MetricSnapshot).
    pub name: String,

    /// Human-readable label.
    pub label: String,

    /// The value is a cumulative counter; the consumer should report the
    /// difference between consecutive snapshots rather than the raw value.
    pub diff: bool,

    /// Render stacked with sibling series of the same graph.
    pub stacked: bool,
}

impl MetricSeriesSpec {
    /// Create an independent, non-diffed series.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            diff: false,
            stacked: false,
        }
    }

    /// Set whether the series is diffed by the consumer.
    pub fn diff(mut self, diff: bool) -> Self {
        self.diff = diff;
        self
    }

    /// Set whether the series is stacked.
    pub fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }
}

/// A named group of series sharing a label and unit.
///
/// # Example
///
/// ```rust
/// use unbound_stats_types::{GraphSpec, MetricSeriesSpec, Unit};
///
/// let graph = GraphSpec::builder("num")
///     .label("Unbound Traffics")
///     .unit(Unit::Integer)
///     .series(MetricSeriesSpec::new("cachemiss", "Cache miss").diff(true).stacked(true))
///     .series(MetricSeriesSpec::new("cachehits", "Cache hits").diff(true).stacked(true))
///     .build();
///
/// assert_eq!(graph.key, "num");
/// assert_eq!(graph.series("cachehits").map(|s| s.stacked), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSpec {
    /// Short grouping key (e.g. `"num"`).
    pub key: String,

    /// Human-readable graph label.
    pub label: String,

    /// Unit shared by every series in the graph.
    pub unit: Unit,

    /// Series in display order.
    pub metrics: Vec<MetricSeriesSpec>,
}

impl GraphSpec {
    /// Create a builder for a graph with the given key.
    pub fn builder(key: impl Into<String>) -> GraphSpecBuilder {
        GraphSpecBuilder::new(key)
    }

    /// Look up a series by metric name.
    pub fn series(&self, name: &str) -> Option<&MetricSeriesSpec> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Names of every series in display order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.name.as_str())
    }
}

/// Builder for constructing `GraphSpec` instances.
#[derive(Debug)]
pub struct GraphSpecBuilder {
    key: String,
    label: Option<String>,
    unit: Unit,
    metrics: Vec<MetricSeriesSpec>,
}

impl GraphSpecBuilder {
    /// Create a new builder.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            unit: Unit::default(),
            metrics: Vec::new(),
        }
    }

    /// Set the graph label (default: the key).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the unit (default: float).
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Append a series.
    pub fn series(mut self, series: MetricSeriesSpec) -> Self {
        self.metrics.push(series);
        self
    }

    /// Build the graph.
    pub fn build(self) -> GraphSpec {
        GraphSpec {
            label: self.label.unwrap_or_else(|| self.key.clone()),
            key: self.key,
            unit: self.unit,
            metrics: self.metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_defaults() {
        let series = MetricSeriesSpec::new("queries", "Total queries from clients");
        assert!(!series.diff);
        assert!(!series.stacked);

        let series = series.diff(true).stacked(true);
        assert!(series.diff);
        assert!(series.stacked);
    }

    #[test]
    fn test_builder_defaults() {
        let graph = GraphSpec::builder("num").build();
        assert_eq!(graph.key, "num");
        assert_eq!(graph.label, "num");
        assert_eq!(graph.unit, Unit::Float);
        assert!(graph.metrics.is_empty());
    }

    #[test]
    fn test_builder_preserves_series_order() {
        let graph = GraphSpec::builder("num")
            .label("Traffics")
            .unit(Unit::Integer)
            .series(MetricSeriesSpec::new("b", "B"))
            .series(MetricSeriesSpec::new("a", "A"))
            .build();

        assert_eq!(graph.metric_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(graph.series("a").map(|s| s.label.as_str()), Some("A"));
        assert!(graph.series("c").is_none());
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(Unit::Integer.as_str(), "integer");
        assert_eq!(Unit::BytesPerSecond.as_str(), "bytes/sec");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_unit_serializes_as_agent_name() {
        assert_eq!(
            serde_json::to_string(&Unit::BytesPerSecond).unwrap(),
            r#""bytes/sec""#
        );
        assert_eq!(serde_json::to_string(&Unit::Integer).unwrap(), r#""integer""#);
    }
}
