//! Live source backed by `unbound-control`.
//!
//! Each fetch runs `unbound-control [-c <conf>] stats_noreset` once. The
//! child's stdout is parsed as it streams and drained completely before the
//! exit status is collected, so a chatty resolver can never fill the pipe
//! and stall the child while we wait on it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use unbound_stats_adapter::{StatsSource, UnboundControl};
//!
//! let control = UnboundControl::builder()
//!     .command_path("/usr/sbin/unbound-control")
//!     .conf_path("/etc/unbound/unbound.conf")
//!     .build();
//!
//! let snapshot = control.fetch()?;
//! println!("queries: {:?}", snapshot.get("queries"));
//! # Ok::<(), unbound_stats_adapter::FetchError>(())
//! ```

use std::ffi::OsString;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};
use unbound_stats_types::MetricSnapshot;

use crate::{parse_stats, FetchError, StatsSource};

/// Default location of the control binary.
pub const DEFAULT_COMMAND_PATH: &str = "/usr/sbin/unbound-control";

/// Subcommand that reports statistics without clearing the counters.
pub const STATS_SUBCOMMAND: &str = "stats_noreset";

/// Source that queries a running Unbound through its control tool.
#[derive(Debug, Clone)]
pub struct UnboundControl {
    command_path: PathBuf,
    conf_path: Option<PathBuf>,
    description: String,
}

impl UnboundControl {
    /// Create a new builder for configuring the source.
    pub fn builder() -> UnboundControlBuilder {
        UnboundControlBuilder::default()
    }

    /// Path of the control binary.
    pub fn command_path(&self) -> &Path {
        &self.command_path
    }

    /// Unbound configuration file passed with `-c`, if any.
    pub fn conf_path(&self) -> Option<&Path> {
        self.conf_path.as_deref()
    }

    /// Arguments passed to the control binary.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(3);
        if let Some(conf) = &self.conf_path {
            args.push(OsString::from("-c"));
            args.push(conf.clone().into_os_string());
        }
        args.push(OsString::from(STATS_SUBCOMMAND));
        args
    }

    fn spawn(&self) -> Result<Child, FetchError> {
        debug!("Running {} {:?}", self.command_path.display(), self.args());

        Command::new(&self.command_path)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| self.launch_error(source))
    }

    fn launch_error(&self, source: io::Error) -> FetchError {
        FetchError::Launch {
            command: self.command_path.clone(),
            source,
        }
    }
}

impl StatsSource for UnboundControl {
    fn fetch(&self) -> Result<MetricSnapshot, FetchError> {
        let mut child = self.spawn()?;

        let Some(stdout) = child.stdout.take() else {
            reap(&mut child);
            return Err(self.launch_error(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "stdout pipe unavailable",
            )));
        };

        // Parse to EOF before waiting; the pipe is closed when the reader drops.
        let parsed = parse_stats(BufReader::new(stdout));

        let snapshot = match parsed {
            Ok(snapshot) => snapshot,
            Err(err) => {
                reap(&mut child);
                return Err(err.into());
            }
        };

        let status = child.wait().map_err(|source| FetchError::Wait {
            command: self.command_path.clone(),
            source,
        })?;

        if !status.success() {
            warn!(
                "{} exited with {}, discarding {} counters",
                self.command_path.display(),
                status,
                snapshot.len()
            );
            return Err(FetchError::Exit {
                command: self.command_path.clone(),
                status,
            });
        }

        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

// Kill and collect a child whose output we abandoned.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("kill failed: {}", e);
    }
    if let Err(e) = child.wait() {
        warn!("failed to reap child {}: {}", child.id(), e);
    }
}

/// Builder for UnboundControl.
#[derive(Debug, Default)]
pub struct UnboundControlBuilder {
    command_path: Option<PathBuf>,
    conf_path: Option<PathBuf>,
}

impl UnboundControlBuilder {
    /// Set the control binary (default: `/usr/sbin/unbound-control`).
    pub fn command_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.command_path = Some(path.into());
        self
    }

    /// Set the Unbound configuration file passed with `-c`.
    pub fn conf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.conf_path = Some(path.into());
        self
    }

    /// Set or clear the Unbound configuration file.
    ///
    /// An empty path counts as no configuration file.
    pub fn maybe_conf_path(mut self, path: Option<PathBuf>) -> Self {
        self.conf_path = path;
        self
    }

    /// Build the source.
    pub fn build(self) -> UnboundControl {
        let command_path = self
            .command_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMAND_PATH));
        let description = format!("unbound-control: {}", command_path.display());

        UnboundControl {
            command_path,
            conf_path: self.conf_path.filter(|p| !p.as_os_str().is_empty()),
            description,
        }
    }
}
