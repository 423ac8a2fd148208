//! MetricSnapshot - a point-in-time read of the resolver's counters.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// A single point-in-time read of all exposed counters.
///
/// Values are raw cumulative counters as reported by the resolver. A fresh
/// snapshot is produced by every fetch and handed to the caller, which owns
/// it from then on. Keys are kept ordered so that anything rendered from a
/// snapshot is deterministic.
///
/// # Example
///
/// ```rust
/// use unbound_stats_types::MetricSnapshot;
///
/// let mut snapshot = MetricSnapshot::new();
/// snapshot.insert("queries", 150.0);
/// snapshot.insert("queries", 200.0);
///
/// assert_eq!(snapshot.len(), 1);
/// assert_eq!(snapshot.get("queries"), Some(200.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MetricSnapshot {
    values: BTreeMap<String, f64>,
}

impl MetricSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any earlier value for the same name.
    ///
    /// Returns the replaced value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Get the value for a metric name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Check if a metric is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct metrics.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over metrics in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Consume the snapshot and return the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.values
    }
}

impl From<BTreeMap<String, f64>> for MetricSnapshot {
    fn from(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, f64)> for MetricSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MetricSnapshot {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
