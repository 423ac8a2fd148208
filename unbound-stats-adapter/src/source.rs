//! Stats source abstraction.
//!
//! A source produces one [`MetricSnapshot`] per call. The live source is
//! [`UnboundControl`](crate::UnboundControl); [`FixtureSource`] replays
//! canned output through the same parser without spawning anything.

use std::fmt::Debug;

use unbound_stats_types::MetricSnapshot;

use crate::{parse_stats, FetchError};

/// Trait for obtaining a live snapshot of resolver counters.
///
/// # Example
///
/// ```
/// use unbound_stats_adapter::{FixtureSource, StatsSource};
///
/// let source = FixtureSource::new("total.num.queries=150\n");
/// let snapshot = source.fetch().unwrap();
/// assert_eq!(snapshot.get("queries"), Some(150.0));
/// ```
pub trait StatsSource: Debug {
    /// Fetch a fresh snapshot, blocking until it is complete.
    fn fetch(&self) -> Result<MetricSnapshot, FetchError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

/// A source that parses fixed text on every fetch.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    output: String,
    description: String,
}

impl FixtureSource {
    /// Create a fixture source from captured `stats_noreset` output.
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            description: "fixture".to_string(),
        }
    }

    /// Override the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl StatsSource for FixtureSource {
    fn fetch(&self) -> Result<MetricSnapshot, FetchError> {
        Ok(parse_stats(self.output.as_bytes())?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    #[test]
    fn test_fixture_fetch() {
        let source = FixtureSource::new("total.num.queries=150\ntotal.num.cachehits=100\n");
        let snapshot = source.fetch().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(source.description(), "fixture");
    }

    #[test]
    fn test_fixture_fetch_is_fresh_each_time() {
        let source = FixtureSource::new("total.num.queries=150\n");
        let mut first = source.fetch().unwrap();
        first.insert("queries", 0.0);

        let second = source.fetch().unwrap();
        assert_eq!(second.get("queries"), Some(150.0));
    }

    #[test]
    fn test_fixture_parse_error() {
        let source = FixtureSource::new("total.num.queries=abc\n").with_description("broken");
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, FetchError::Parse(ParseError::InvalidValue { .. })));
        assert_eq!(source.description(), "broken");
    }
}
