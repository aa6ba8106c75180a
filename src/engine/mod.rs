//! Perft engines.
//!
//! Both sides of a comparison implement [`PerftEngine`]: the subject speaks
//! the one-shot argument protocol ([`OneShotEngine`]), the oracle a
//! persistent UCI session ([`SessionEngine`]).

use std::collections::BTreeMap;

use log::debug;

use crate::error::EngineError;

pub mod oneshot;
pub mod parse;
pub mod session;

pub use oneshot::OneShotEngine;
pub use session::SessionEngine;

/// Node counts reported by one engine for one query.
///
/// A move missing from `per_move` was not reported; it is not a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeCountResult {
    pub total: u64,
    pub per_move: BTreeMap<String, u64>,
}

impl NodeCountResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a per-move count. A repeated move keeps the later value.
    pub fn record_move(&mut self, mv: &str, count: u64) {
        if let Some(previous) = self.per_move.insert(mv.to_string(), count) {
            if previous != count {
                debug!("move {mv} reported twice ({previous} then {count}), keeping {count}");
            }
        }
    }

    /// True if nothing at all was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.per_move.is_empty()
    }

    /// Sum of the per-move counts.
    #[must_use]
    pub fn per_move_sum(&self) -> u64 {
        self.per_move.values().sum()
    }
}

/// Something that can count perft nodes from a position.
pub trait PerftEngine {
    /// Short label used in logs and as the report column header.
    fn name(&self) -> &str;

    /// Run perft to `depth` from `fen` after playing `moves`.
    fn perft(
        &mut self,
        fen: &str,
        moves: &[String],
        depth: u32,
    ) -> Result<NodeCountResult, EngineError>;
}
