//! Line grammars for the two engine protocols.
//!
//! Every function here is total: a line that does not fit the grammar
//! yields `None` and the caller skips it. Engines are free to print banner
//! text or diagnostics between the lines that matter.

use log::trace;

use super::NodeCountResult;

/// Marker that ends a UCI `go perft` reply.
pub const NODES_MARKER: &str = "Nodes searched:";

/// Parse a subject per-move line: `<move> <count>`.
///
/// Only the first two tokens are considered; anything after them is ignored.
#[must_use]
pub fn parse_subject_move_line(line: &str) -> Option<(&str, u64)> {
    let mut tokens = line.split_whitespace();
    let mv = tokens.next()?;
    let count = tokens.next()?.parse::<u64>().ok()?;
    Some((mv, count))
}

/// Parse a subject total line: a bare leading integer.
#[must_use]
pub fn parse_subject_total_line(line: &str) -> Option<u64> {
    line.split_whitespace().next()?.parse::<u64>().ok()
}

/// Parse a complete one-shot subject output.
///
/// Lines may arrive in any order. Per-move lines fill `per_move`; a bare
/// integer overwrites `total`. Anything else is skipped.
///
/// Any line shaped like `<word> <integer>` is a per-move line, so a subject
/// diagnostic such as `Depth: 3` on stdout shows up as a move `Depth:` that
/// the oracle never reports. Subjects should keep diagnostics on stderr.
pub fn parse_subject_output<I, S>(lines: I) -> NodeCountResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = NodeCountResult::new();
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        if let Some((mv, count)) = parse_subject_move_line(line) {
            result.record_move(mv, count);
        } else if let Some(total) = parse_subject_total_line(line) {
            result.total = total;
        } else {
            trace!("skipping subject line: {line}");
        }
    }
    result
}

/// Parse an oracle per-move line: `<move>: <count>`.
#[must_use]
pub fn parse_oracle_move_line(line: &str) -> Option<(&str, u64)> {
    let mut tokens = line.split_whitespace();
    let mv = tokens.next()?.strip_suffix(':')?;
    if mv.is_empty() {
        return None;
    }
    let count = tokens.next()?.parse::<u64>().ok()?;
    Some((mv, count))
}

/// If `line` carries the node-count marker, return the text after it.
#[must_use]
pub fn split_nodes_marker(line: &str) -> Option<&str> {
    line.find(NODES_MARKER)
        .map(|idx| line[idx + NODES_MARKER.len()..].trim())
}

/// Build the UCI `position` command.
#[must_use]
pub fn position_command(fen: &str, moves: &[String]) -> String {
    let mut cmd = format!("position fen {fen}");
    if !moves.is_empty() {
        cmd.push_str(" moves");
        for mv in moves {
            cmd.push(' ');
            cmd.push_str(mv);
        }
    }
    cmd
}

/// Build the UCI `go perft` command.
#[must_use]
pub fn go_perft_command(depth: u32) -> String {
    format!("go perft {depth}")
}
