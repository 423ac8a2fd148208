//! Graph definitions for the Unbound counters.
//!
//! The series are declared as a constant table so the schema can be
//! inspected and tested without any rendering logic attached.

use unbound_stats_types::{GraphSpec, MetricSeriesSpec, Unit};

/// Metric key prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "unbound";

/// Key of the query-traffic graph.
pub const NUM_GRAPH_KEY: &str = "num";

/// One row of a declarative graph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesRow {
    pub name: &'static str,
    pub label: &'static str,
    pub diff: bool,
    pub stacked: bool,
}

/// Series of the `num` graph, in display order.
pub const NUM_SERIES: &[SeriesRow] = &[
    SeriesRow {
        name: "recursivereplies",
        label: "Received replies",
        diff: true,
        stacked: false,
    },
    SeriesRow {
        name: "prefetch",
        label: "Cache prefetch",
        diff: true,
        stacked: false,
    },
    SeriesRow {
        name: "cachemiss",
        label: "Cache miss",
        diff: true,
        stacked: true,
    },
    SeriesRow {
        name: "cachehits",
        label: "Cache hits",
        diff: true,
        stacked: true,
    },
    SeriesRow {
        name: "queries",
        label: "Total queries from clients",
        diff: true,
        stacked: false,
    },
];

impl From<&SeriesRow> for MetricSeriesSpec {
    fn from(row: &SeriesRow) -> Self {
        MetricSeriesSpec::new(row.name, row.label)
            .diff(row.diff)
            .stacked(row.stacked)
    }
}

/// Resolve the effective prefix, falling back to [`DEFAULT_PREFIX`].
pub fn effective_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        DEFAULT_PREFIX
    } else {
        prefix
    }
}

/// Build the graph definitions for a metric key prefix.
///
/// The prefix is title-cased into the graph label, so `"unbound"` yields
/// `"Unbound Traffics"`. The result depends only on the prefix.
///
/// # Example
///
/// ```rust
/// use unbound_stats_adapter::graph_definition;
///
/// let graphs = graph_definition("unbound");
/// assert_eq!(graphs.len(), 1);
/// assert_eq!(graphs[0].key, "num");
/// assert_eq!(graphs[0].label, "Unbound Traffics");
/// ```
pub fn graph_definition(prefix: &str) -> Vec<GraphSpec> {
    let label = format!("{} Traffics", title_case(effective_prefix(prefix)));

    let graph = NUM_SERIES
        .iter()
        .fold(
            GraphSpec::builder(NUM_GRAPH_KEY).label(label).unit(Unit::Integer),
            |builder, row| builder.series(row.into()),
        )
        .build();

    vec![graph]
}

/// Upper-case the first letter of every word.
///
/// ASCII letters, digits and `_` continue a word and other ASCII characters
/// separate words. Beyond ASCII only whitespace separates.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_separator(c);
    }

    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else if c.is_alphanumeric() {
        false
    } else {
        c.is_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_graph() {
        let graphs = graph_definition("unbound");
        assert_eq!(graphs.len(), 1);

        let graph = &graphs[0];
        assert_eq!(graph.key, "num");
        assert_eq!(graph.label, "Unbound Traffics");
        assert_eq!(graph.unit, Unit::Integer);

        let labels: Vec<&str> = graph.metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Received replies",
                "Cache prefetch",
                "Cache miss",
                "Cache hits",
                "Total queries from clients",
            ]
        );
        assert!(graph.metrics.iter().all(|m| m.diff));
    }

    #[test]
    fn test_stacked_series() {
        let graphs = graph_definition("unbound");
        let stacked: Vec<&str> = graphs[0]
            .metrics
            .iter()
            .filter(|m| m.stacked)
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(stacked, vec!["cachemiss", "cachehits"]);
    }

    #[test]
    fn test_same_prefix_same_schema() {
        assert_eq!(graph_definition("unbound"), graph_definition("unbound"));
        assert_eq!(graph_definition("dns-edge"), graph_definition("dns-edge"));
    }

    #[test]
    fn test_custom_prefix_label() {
        let graphs = graph_definition("edge-resolver");
        assert_eq!(graphs[0].label, "Edge-Resolver Traffics");
        assert_eq!(graphs[0].metrics.len(), NUM_SERIES.len());
    }

    #[test]
    fn test_empty_prefix_uses_default() {
        assert_eq!(effective_prefix(""), "unbound");
        assert_eq!(graph_definition(""), graph_definition("unbound"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("unbound"), "Unbound");
        assert_eq!(title_case("my unbound"), "My Unbound");
        assert_eq!(title_case("dns.cache"), "Dns.Cache");
        assert_eq!(title_case("dns_cache"), "Dns_cache");
        assert_eq!(title_case("2nd"), "2nd");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_non_ascii() {
        assert_eq!(title_case("a€b"), "A€b");
        assert_eq!(title_case("a\u{3000}b"), "A\u{3000}B");
        assert_eq!(title_case("été dns"), "Été Dns");
    }
}
