//! Oracle engine kept alive for a whole debugging session.
//!
//! # Protocol
//!
//! ```text
//! > uci
//! < ... uciok
//! > position fen <fen> [moves <m1> <m2> ...]
//! > go perft <depth>
//! < <move>: <count>
//! < Nodes searched: <total>
//! ```
//!
//! Reading stops at the `Nodes searched:` line so that whatever the engine
//! prints afterwards stays in the pipe and the exchange remains strictly
//! request/response.

use log::{debug, trace, warn};

use crate::config::EngineCommand;
use crate::error::EngineError;
use crate::process::ProcessChannel;

use super::parse::{go_perft_command, parse_oracle_move_line, position_command, split_nodes_marker};
use super::{NodeCountResult, PerftEngine};

/// Token that acknowledges the `uci` handshake.
pub const HANDSHAKE_TOKEN: &str = "uciok";

/// A UCI engine answering `go perft` over one persistent channel.
#[derive(Debug)]
pub struct SessionEngine {
    channel: ProcessChannel,
}

impl SessionEngine {
    /// Spawn the oracle and complete the `uci` handshake.
    ///
    /// At most `max_lines` lines are read while waiting for `uciok`. The
    /// process is killed if the handshake fails.
    pub fn start(command: &EngineCommand, max_lines: usize) -> Result<Self, EngineError> {
        let mut channel =
            ProcessChannel::spawn(&command.program, &command.args).map_err(EngineError::Spawn)?;
        let handshake_failed = || EngineError::Handshake {
            command: command.to_string(),
            token: HANDSHAKE_TOKEN,
            lines: max_lines,
        };

        channel.write_line("uci").map_err(|_| handshake_failed())?;
        for _ in 0..max_lines {
            match channel.read_line() {
                Some(line) if line.contains(HANDSHAKE_TOKEN) => {
                    debug!("oracle `{}` ready", channel.command());
                    return Ok(SessionEngine { channel });
                }
                Some(line) => trace!("handshake: {line}"),
                None => break,
            }
        }
        Err(handshake_failed())
    }

    /// Send `quit` and tear the process down.
    pub fn shutdown(mut self) {
        self.quit();
    }

    fn quit(&mut self) {
        if self.channel.is_alive() {
            let _ = self.channel.write_line("quit");
        }
        self.channel.terminate_and_wait();
    }

    fn read_reply(&mut self) -> NodeCountResult {
        let mut result = NodeCountResult::new();
        while let Some(line) = self.channel.read_line() {
            if let Some(rest) = split_nodes_marker(&line) {
                result.total = rest.parse().unwrap_or_else(|_| {
                    warn!("unreadable node total from oracle: {line}");
                    0
                });
                return result;
            }
            match parse_oracle_move_line(&line) {
                Some((mv, count)) => result.record_move(mv, count),
                None => trace!("skipping oracle line: {line}"),
            }
        }
        warn!(
            "oracle `{}` closed its output before reporting a total",
            self.channel.command()
        );
        result
    }
}

impl PerftEngine for SessionEngine {
    fn name(&self) -> &str {
        "Oracle"
    }

    fn perft(
        &mut self,
        fen: &str,
        moves: &[String],
        depth: u32,
    ) -> Result<NodeCountResult, EngineError> {
        let sent = self
            .channel
            .write_line(&position_command(fen, moves))
            .and_then(|()| self.channel.write_line(&go_perft_command(depth)));
        if let Err(e) = sent {
            warn!("{e}");
            return Ok(NodeCountResult::new());
        }
        Ok(self.read_reply())
    }
}

impl Drop for SessionEngine {
    fn drop(&mut self) {
        self.quit();
    }
}
