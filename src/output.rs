//! Agent plugin protocol.
//!
//! In values mode every declared series present in the snapshot is written
//! as `<prefix>.<graph>.<name>\t<value>\t<timestamp>`. In meta mode the graph
//! definitions are written as a JSON document after a fixed header line.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io::{self, Write};

use serde::Serialize;
use unbound_stats_types::{GraphSpec, MetricSeriesSpec, Unit};

use crate::plugin::Collection;

/// Environment variable the agent sets when it wants graph definitions.
pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

/// First line of the meta document.
pub const META_HEADER: &str = "# mackerel-agent-plugin";

/// Whether the agent asked for graph definitions.
pub fn meta_requested() -> bool {
    is_meta_value(std::env::var_os(META_ENV).as_deref())
}

// Any non-empty value switches to meta mode.
fn is_meta_value(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
struct GraphMeta<'a> {
    graphs: BTreeMap<String, GraphEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct GraphEntry<'a> {
    label: &'a str,
    unit: Unit,
    metrics: &'a [MetricSeriesSpec],
}

/// Write the graph definitions, keyed by `<prefix>.<graph>`.
pub fn write_meta<W: Write>(out: &mut W, prefix: &str, graphs: &[GraphSpec]) -> io::Result<()> {
    let meta = GraphMeta {
        graphs: graphs
            .iter()
            .map(|g| {
                (
                    format!("{}.{}", prefix, g.key),
                    GraphEntry {
                        label: &g.label,
                        unit: g.unit,
                        metrics: &g.metrics,
                    },
                )
            })
            .collect(),
    };

    writeln!(out, "{}", META_HEADER)?;
    serde_json::to_writer(&mut *out, &meta)?;
    writeln!(out)
}

/// Write one line per declared series found in the snapshot.
///
/// Series missing from the snapshot are skipped. Returns the number of
/// lines written.
pub fn write_values<W: Write>(
    out: &mut W,
    prefix: &str,
    graphs: &[GraphSpec],
    collection: &Collection,
) -> io::Result<usize> {
    let mut written = 0;

    for graph in graphs {
        for series in &graph.metrics {
            let Some(value) = collection.snapshot.get(&series.name) else {
                continue;
            };
            writeln!(
                out,
                "{}.{}.{}\t{}\t{}",
                prefix, graph.key, series.name, value, collection.timestamp
            )?;
            written += 1;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unbound_stats_adapter::graph_definition;
    use unbound_stats_types::MetricSnapshot;

    fn collection(pairs: &[(&str, f64)]) -> Collection {
        Collection {
            timestamp: 1_700_000_000,
            snapshot: pairs
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<MetricSnapshot>(),
        }
    }

    #[test]
    fn test_write_values_in_schema_order() {
        let graphs = graph_definition("unbound");
        let collection = collection(&[
            ("queries", 150.0),
            ("cachehits", 100.0),
            ("cachemiss", 50.0),
            ("prefetch", 3.0),
            ("recursivereplies", 50.0),
            ("expired", 0.0),
        ]);

        let mut out = Vec::new();
        let written = write_values(&mut out, "unbound", &graphs, &collection).unwrap();

        assert_eq!(written, 5);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "unbound.num.recursivereplies\t50\t1700000000\n\
             unbound.num.prefetch\t3\t1700000000\n\
             unbound.num.cachemiss\t50\t1700000000\n\
             unbound.num.cachehits\t100\t1700000000\n\
             unbound.num.queries\t150\t1700000000\n"
        );
    }

    #[test]
    fn test_write_values_skips_missing_series() {
        let graphs = graph_definition("edge");
        let collection = collection(&[("queries", 1.5)]);

        let mut out = Vec::new();
        let written = write_values(&mut out, "edge", &graphs, &collection).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "edge.num.queries\t1.5\t1700000000\n"
        );
    }

    #[test]
    fn test_write_meta() {
        let graphs = graph_definition("unbound");
        let mut out = Vec::new();
        write_meta(&mut out, "unbound", &graphs).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(META_HEADER));

        let json: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        let graph = &json["graphs"]["unbound.num"];
        assert_eq!(graph["label"], "Unbound Traffics");
        assert_eq!(graph["unit"], "integer");

        let metrics = graph["metrics"].as_array().unwrap();
        assert_eq!(metrics.len(), 5);
        assert_eq!(metrics[2]["name"], "cachemiss");
        assert_eq!(metrics[2]["label"], "Cache miss");
        assert_eq!(metrics[2]["stacked"], true);
        assert_eq!(metrics[4]["diff"], true);
        assert_eq!(metrics[4]["stacked"], false);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_meta_value() {
        assert!(!is_meta_value(None));
        assert!(!is_meta_value(Some(OsStr::new(""))));
        assert!(is_meta_value(Some(OsStr::new("1"))));
        assert!(is_meta_value(Some(OsStr::new("true"))));
    }

    #[test]
    fn test_write_meta_is_stable() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_meta(&mut first, "unbound", &graph_definition("unbound")).unwrap();
        write_meta(&mut second, "unbound", &graph_definition("unbound")).unwrap();
        assert_eq!(first, second);
    }
}
