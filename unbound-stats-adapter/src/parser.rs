//! Parser for `unbound-control stats_noreset` output.
//!
//! The control tool prints one `key=value` pair per line. Only the
//! resolver-wide cumulative counters (`total.num.*`) are kept; thread-level,
//! histogram and memory lines are ignored.

use std::io::BufRead;

use tracing::debug;
use unbound_stats_types::MetricSnapshot;

use crate::ParseError;

/// Prefix of the cumulative counter lines.
pub const COUNTER_PREFIX: &str = "total.num.";

/// Parse a statistics stream into a snapshot.
///
/// Lines that do not start with [`COUNTER_PREFIX`], or that have no `=`
/// after it, are skipped. A counter whose value is not a number fails the
/// whole parse and nothing is returned. Values are parsed as-is: surrounding
/// whitespace is not trimmed and is reported as an invalid value. When a
/// name repeats, the last value wins.
///
/// # Example
///
/// ```rust
/// use unbound_stats_adapter::parse_stats;
///
/// let output = "total.num.queries=150\ntotal.num.cachehits=100\nthread0.num.queries=75\n";
/// let snapshot = parse_stats(output.as_bytes()).unwrap();
///
/// assert_eq!(snapshot.len(), 2);
/// assert_eq!(snapshot.get("queries"), Some(150.0));
/// ```
pub fn parse_stats<R: BufRead>(reader: R) -> Result<MetricSnapshot, ParseError> {
    let mut snapshot = MetricSnapshot::new();

    for line in reader.split(b'\n') {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);

        let Some(body) = line.strip_prefix(COUNTER_PREFIX.as_bytes()) else {
            continue;
        };
        let body = String::from_utf8_lossy(body);
        let Some((name, value)) = body.split_once('=') else {
            continue;
        };

        let parsed = value
            .parse::<f64>()
            .map_err(|source| ParseError::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
                source,
            })?;
        snapshot.insert(name, parsed);
    }

    debug!("Parsed {} counters", snapshot.len());
    Ok(snapshot)
}
