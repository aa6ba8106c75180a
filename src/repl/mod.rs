//! Interactive command loop.
//!
//! Reads one command per line and applies it to a [`NavigationState`].
//! Regular output goes to `out`, complaints about bad input and failed
//! comparisons go to `err`; neither ends the session.

pub mod command;

use std::io::{self, BufRead, Write};

use log::debug;

use crate::engine::PerftEngine;
use crate::error::display_chain;
use crate::report::{write_query_header, write_report, RenderConfig};
use crate::state::NavigationState;

use command::{parse_command, ReplCommand};

pub const HELP: &str = "\
--- Perft Debugger Commands ---
diff            - Run comparison at the current position.
depth <N>       - Set the total perft depth.
fen <FEN>       - Set the board FEN. Clears current moves.
move <m>        - Make a move (e.g., move e2e4). Alias: child.
unmove          - Go back one move. Alias: parent.
root            - Return to the starting FEN, clear all moves.
help            - Show this help message.
exit / quit     - Close the debugger.
";

const DEPTH_ERROR: &str = "Error: Please provide a positive integer for depth.";

/// Settings for one interactive session.
#[derive(Debug, Clone)]
pub struct ReplOptions {
    pub render: RenderConfig,
    /// Print `> ` before reading each line
    pub prompt: bool,
}

pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{HELP}")
}

/// Run until `quit`/`exit` or end of input.
pub fn run<S, O, R, W, E>(
    state: &mut NavigationState<S, O>,
    input: R,
    out: &mut W,
    err: &mut E,
    options: &ReplOptions,
) -> io::Result<()>
where
    S: PerftEngine,
    O: PerftEngine,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut lines = input.lines();
    loop {
        if options.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            debug!("end of input");
            return Ok(());
        };
        let Some(cmd) = parse_command(&line) else {
            continue;
        };
        if !execute(state, cmd, out, err, options)? {
            return Ok(());
        }
    }
}

/// Apply one command. Returns `false` when the session should end.
pub fn execute<S, O, W, E>(
    state: &mut NavigationState<S, O>,
    cmd: ReplCommand,
    out: &mut W,
    err: &mut E,
    options: &ReplOptions,
) -> io::Result<bool>
where
    S: PerftEngine,
    O: PerftEngine,
    W: Write,
    E: Write,
{
    match cmd {
        ReplCommand::Fen(fen) if fen.is_empty() => {
            writeln!(err, "Error: FEN cannot be empty.")?;
        }
        ReplCommand::Fen(fen) => {
            state.set_fen(fen);
            writeln!(out, "FEN set. Moves cleared.")?;
        }
        ReplCommand::Depth(Some(depth)) => match state.set_depth(depth) {
            Ok(()) => writeln!(out, "Total depth set to {depth}.")?,
            Err(_) => writeln!(err, "{DEPTH_ERROR}")?,
        },
        ReplCommand::Depth(None) => writeln!(err, "{DEPTH_ERROR}")?,
        ReplCommand::Move(Some(mv)) => {
            writeln!(out, "Made move: {mv}")?;
            state.push_move(mv);
        }
        ReplCommand::Move(None) => {
            writeln!(err, "Error: Please provide a move (e.g., move e2e4).")?;
        }
        ReplCommand::Unmove => {
            state.pop_move();
            writeln!(out, "Moved back one position.")?;
        }
        ReplCommand::Root => {
            state.go_root();
            writeln!(out, "Reset to root position.")?;
        }
        ReplCommand::Diff => {
            write_query_header(out, state.fen(), state.moves(), state.effective_depth())?;
            match state.run_comparison() {
                Ok(report) => write_report(out, &report, &options.render)?,
                Err(e) => writeln!(err, "Error: {}", display_chain(&e))?,
            }
        }
        ReplCommand::Help => print_help(out)?,
        ReplCommand::Quit => return Ok(false),
        ReplCommand::Unknown(word) => {
            writeln!(
                err,
                "Unknown command: '{word}'. Type 'help' for a list of commands."
            )?;
        }
    }
    Ok(true)
}
