use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use unbound_stats::output::{self, meta_requested};
use unbound_stats::{Overrides, Settings, UnboundPlugin};

#[derive(Parser, Debug)]
#[command(name = "unbound-stats")]
#[command(about = "Report Unbound resolver statistics to a monitoring agent")]
struct Args {
    /// Path of unbound-control [default: /usr/sbin/unbound-control]
    #[arg(long)]
    path: Option<PathBuf>,

    /// Path of the Unbound config file
    #[arg(long)]
    conf: Option<PathBuf>,

    /// Metric key prefix [default: unbound]
    #[arg(long = "metric-key-prefix")]
    metric_key_prefix: Option<String>,

    /// Temp file name (agent state, passed through)
    #[arg(long)]
    tempfile: Option<PathBuf>,

    /// Settings file (TOML, YAML or JSON)
    #[arg(long, env = "UNBOUND_STATS_SETTINGS")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    // stdout carries the agent protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let overrides = Overrides {
        command_path: args.path,
        conf_path: args.conf,
        prefix: args.metric_key_prefix,
        tempfile: args.tempfile,
    };
    let settings =
        Settings::load(args.settings.as_deref(), overrides).context("Failed to load settings")?;

    let plugin = UnboundPlugin::from_settings(&settings);
    debug!(
        "Using {} with state file {:?}",
        plugin.source_description(),
        plugin.state_file()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if meta_requested() {
        output::write_meta(
            &mut out,
            plugin.metric_key_prefix(),
            &plugin.graph_definition(),
        )?;
        out.flush()?;
        return Ok(());
    }

    let collection = plugin.collect().context("Failed to fetch metrics")?;

    let written = output::write_values(
        &mut out,
        plugin.metric_key_prefix(),
        &plugin.graph_definition(),
        &collection,
    )?;
    debug!("Wrote {} of {} counters", written, collection.snapshot.len());

    out.flush()?;
    Ok(())
}
