//! Perft divergence debugger.
//!
//! Drives a move generator under test (the subject) and a trusted UCI engine
//! (the oracle) through the same position and reports where their perft
//! breakdowns disagree.

pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod process;
pub mod repl;
pub mod report;
pub mod state;

pub use config::{ColorMode, DebuggerConfig, EngineCommand, START_FEN};
pub use diff::{compare, ComparisonEntry, ComparisonReport, EntryStatus};
pub use engine::{NodeCountResult, OneShotEngine, PerftEngine, SessionEngine};
pub use error::{ChannelError, EngineError, NavigationError};
pub use process::ProcessChannel;
pub use state::NavigationState;
