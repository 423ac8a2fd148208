//! Error types for collecting statistics.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while parsing statistics output.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A counter line carried a value that is not a number.
    #[error("invalid value for total.num.{name}: {value:?}")]
    InvalidValue {
        name: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Reading the stream failed.
    #[error("failed to read statistics: {0}")]
    Read(#[from] io::Error),
}

/// Errors that can occur when fetching a snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The command could not be started or its output pipe was unavailable.
    #[error("failed to launch {}: {source}", .command.display())]
    Launch {
        command: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The command's output could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Waiting for the command to finish failed.
    #[error("failed to wait for {}: {source}", .command.display())]
    Wait {
        command: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The command exited unsuccessfully.
    #[error("{} exited unsuccessfully: {status}", .command.display())]
    Exit { command: PathBuf, status: ExitStatus },
}
