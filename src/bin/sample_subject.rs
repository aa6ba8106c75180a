//! Skeleton of a subject engine for `perft_debugger`.
//!
//! Parses the one-shot arguments `<depth> <fen> [moves]` and echoes them to
//! stderr. A real move generator would instead print one `<move> <count>`
//! line per legal move on stdout, then a blank line and the total.

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Error: Not enough arguments provided.");
        eprintln!("usage: sample_subject <depth> <fen> [moves]");
        return ExitCode::FAILURE;
    }

    let Ok(depth) = args[1].parse::<u32>() else {
        eprintln!("Error: depth '{}' is not a number", args[1]);
        return ExitCode::FAILURE;
    };
    let fen = &args[2];
    let moves: Vec<&str> = args
        .get(3)
        .map(|line| line.split_whitespace().collect())
        .unwrap_or_default();

    eprintln!("Engine received:");
    eprintln!("  Depth: {depth}");
    eprintln!("  FEN: {fen}");
    eprintln!("  Moves to make: {}", moves.join(" "));

    println!();
    println!("0");
    ExitCode::SUCCESS
}
