//! Walking the move tree between comparisons.
//!
//! The operator fixes a baseline FEN and a total perft depth, then descends
//! into the tree one move at a time. Every step down costs one ply, so the
//! depth actually queried is the total depth minus the path length, never
//! less than one.

use log::debug;

use crate::config::START_FEN;
use crate::diff::{compare, ComparisonReport};
use crate::engine::PerftEngine;
use crate::error::{EngineError, NavigationError};

/// Current position, move path and target depth, plus the two engines.
pub struct NavigationState<S, O> {
    subject: S,
    oracle: O,
    fen: String,
    moves: Vec<String>,
    depth: u32,
}

impl<S: PerftEngine, O: PerftEngine> NavigationState<S, O> {
    /// Start at the standard position with depth 1.
    pub fn new(subject: S, oracle: O) -> Self {
        NavigationState {
            subject,
            oracle,
            fen: START_FEN.to_string(),
            moves: Vec::new(),
            depth: 1,
        }
    }

    #[must_use]
    pub fn fen(&self) -> &str {
        &self.fen
    }

    #[must_use]
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Total depth as set by the operator.
    #[must_use]
    pub fn target_depth(&self) -> u32 {
        self.depth
    }

    /// Depth the engines are asked for at the current node.
    #[must_use]
    pub fn effective_depth(&self) -> u32 {
        let plies = u32::try_from(self.moves.len()).unwrap_or(u32::MAX);
        self.depth.saturating_sub(plies).max(1)
    }

    /// Replace the baseline position. Always clears the move path.
    pub fn set_fen(&mut self, fen: impl Into<String>) {
        self.fen = fen.into();
        self.moves.clear();
    }

    pub fn set_depth(&mut self, depth: u32) -> Result<(), NavigationError> {
        if depth == 0 {
            return Err(NavigationError::InvalidDepth(depth));
        }
        self.depth = depth;
        Ok(())
    }

    /// Descend into `mv`. Legality is not checked.
    pub fn push_move(&mut self, mv: impl Into<String>) {
        self.moves.push(mv.into());
    }

    /// Go up one ply. Returns the move undone, `None` at the root.
    pub fn pop_move(&mut self) -> Option<String> {
        self.moves.pop()
    }

    pub fn go_root(&mut self) {
        self.moves.clear();
    }

    /// Labels of the subject and oracle engines, in that order.
    #[must_use]
    pub fn engine_names(&self) -> (&str, &str) {
        (self.subject.name(), self.oracle.name())
    }

    /// Query the subject, then the oracle, and compare their breakdowns.
    pub fn run_comparison(&mut self) -> Result<ComparisonReport, EngineError> {
        let depth = self.effective_depth();
        debug!(
            "comparing at depth {depth} after {} moves from {}",
            self.moves.len(),
            self.fen
        );
        let subject = self.subject.perft(&self.fen, &self.moves, depth)?;
        debug!("{} total {}", self.subject.name(), subject.total);
        let oracle = self.oracle.perft(&self.fen, &self.moves, depth)?;
        debug!("{} total {}", self.oracle.name(), oracle.total);
        Ok(compare(&subject, &oracle))
    }

    /// Consume the state, handing back both engines.
    pub fn into_engines(self) -> (S, O) {
        (self.subject, self.oracle)
    }
}
