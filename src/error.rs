//! Error types for engine processes and navigation.

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Failure on a [`ProcessChannel`](crate::process::ProcessChannel).
///
/// Read failures have no variant: a broken output pipe is reported as
/// end-of-stream by `read_line`.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The process (or one of its pipes) could not be started
    #[error("failed to start `{command}`")]
    Spawn { command: String, source: io::Error },
    /// The child's input is closed (process exited or pipe broken)
    #[error("cannot write to `{command}`: input channel is closed")]
    Write { command: String },
}

/// Failure of an engine adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process could not be spawned
    #[error("engine could not be started")]
    Spawn(#[source] ChannelError),
    /// The oracle never acknowledged the handshake
    #[error("`{command}` did not answer with '{token}' within {lines} lines")]
    Handshake {
        command: String,
        token: &'static str,
        lines: usize,
    },
}

/// Rejected navigation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Perft depth must be positive
    #[error("depth must be a positive integer, got {0}")]
    InvalidDepth(u32),
}

/// `err` and all of its causes, joined with `": "`.
#[must_use]
pub fn display_chain(err: &(dyn StdError + 'static)) -> String {
    std::iter::successors(Some(err), |&e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
