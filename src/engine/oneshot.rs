//! Subject engine driven by one process per query.
//!
//! The subject is invoked as `<program> [leading args] <depth> <fen> [moves]`
//! and reports its node counts on stdout before exiting. A subject that
//! cannot be started counts as one that reported nothing, so the comparison
//! still shows the oracle's side.

use log::{debug, warn};

use crate::config::EngineCommand;
use crate::error::{display_chain, EngineError};
use crate::process::ProcessChannel;

use super::parse::parse_subject_output;
use super::{NodeCountResult, PerftEngine};

/// Runs a fresh subject process for every query.
#[derive(Debug, Clone)]
pub struct OneShotEngine {
    command: EngineCommand,
}

impl OneShotEngine {
    #[must_use]
    pub fn new(command: EngineCommand) -> Self {
        OneShotEngine { command }
    }

    #[must_use]
    pub fn command(&self) -> &EngineCommand {
        &self.command
    }

    /// Full argument vector for one query.
    ///
    /// The move argument is omitted when there are no moves.
    #[must_use]
    pub fn arguments(&self, fen: &str, moves: &[String], depth: u32) -> Vec<String> {
        let mut args = self.command.args.clone();
        args.push(depth.to_string());
        args.push(fen.to_string());
        if !moves.is_empty() {
            args.push(moves.join(" "));
        }
        args
    }
}

impl PerftEngine for OneShotEngine {
    fn name(&self) -> &str {
        "Subject"
    }

    fn perft(
        &mut self,
        fen: &str,
        moves: &[String],
        depth: u32,
    ) -> Result<NodeCountResult, EngineError> {
        let args = self.arguments(fen, moves, depth);
        let mut channel = match ProcessChannel::spawn(&self.command.program, &args) {
            Ok(channel) => channel,
            Err(e) => {
                warn!("{}: {}", self.name(), display_chain(&e));
                return Ok(NodeCountResult::new());
            }
        };
        channel.close_input();

        let result = parse_subject_output(std::iter::from_fn(|| channel.read_line()));
        channel.terminate_and_wait();

        if result.is_empty() {
            warn!("{} `{}` reported no node counts", self.name(), channel.command());
        } else {
            debug!(
                "{} reported {} moves, total {}",
                self.name(),
                result.per_move.len(),
                result.total
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(script: &str) -> OneShotEngine {
        // `sh -c <script> <argv0> ...` binds the protocol arguments to $1..$3.
        OneShotEngine::new(EngineCommand::with_args("sh", ["-c", script, "subject"]))
    }

    #[test]
    fn test_arguments_omit_empty_move_list() {
        let engine = OneShotEngine::new(EngineCommand::new("./engine"));
        assert_eq!(
            engine.arguments("FEN", &[], 3),
            vec!["3".to_string(), "FEN".to_string()]
        );
    }

    #[test]
    fn test_arguments_join_moves_and_keep_leading_args() {
        let engine = OneShotEngine::new(EngineCommand::with_args("python3", ["engine.py"]));
        let moves = vec!["e2e4".to_string(), "e7e5".to_string()];
        assert_eq!(
            engine.arguments("FEN", &moves, 2),
            vec![
                "engine.py".to_string(),
                "2".to_string(),
                "FEN".to_string(),
                "e2e4 e7e5".to_string()
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_canonical_output_round_trip() {
        let mut engine = engine_with("printf 'e2e4 20\\n\\n20\\n'");
        let result = engine.perft("fen", &[], 1).unwrap();
        assert_eq!(result.total, 20);
        assert_eq!(result.per_move.len(), 1);
        assert_eq!(result.per_move["e2e4"], 20);
    }

    #[cfg(unix)]
    #[test]
    fn test_protocol_arguments_reach_process() {
        let script = "echo \"depth $1\"; echo \"argc $#\"; \
                      [ \"$2\" = 'some fen' ] && echo 'fenok 1'; \
                      [ \"$3\" = 'e2e4 e7e5' ] && echo 'movesok 1'; \
                      echo 0";
        let mut engine = engine_with(script);

        let moves = vec!["e2e4".to_string(), "e7e5".to_string()];
        let result = engine.perft("some fen", &moves, 4).unwrap();
        assert_eq!(result.per_move["depth"], 4);
        assert_eq!(result.per_move["argc"], 3);
        assert_eq!(result.per_move["fenok"], 1);
        assert_eq!(result.per_move["movesok"], 1);

        let at_root = engine.perft("some fen", &[], 2).unwrap();
        assert_eq!(at_root.per_move["depth"], 2);
        assert_eq!(at_root.per_move["argc"], 2);
        assert!(!at_root.per_move.contains_key("movesok"));
    }

    #[cfg(unix)]
    #[test]
    fn test_crashing_subject_degrades_to_empty_result() {
        let mut engine = engine_with("echo 'thread main panicked'; exit 101");
        let result = engine.perft("fen", &[], 1).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_subject_degrades_to_empty_result() {
        let mut engine = OneShotEngine::new(EngineCommand::new("/nonexistent/subject"));
        let result = engine.perft("fen", &[], 1).unwrap();
        assert!(result.is_empty());
        // The next query tries again rather than remembering the failure.
        assert!(engine.perft("fen", &[], 2).unwrap().is_empty());
    }
}
