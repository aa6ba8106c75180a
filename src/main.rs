use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use perft_debugger::config::{
    ColorMode, DebuggerConfig, EngineCommand, DEFAULT_HANDSHAKE_LINES, DEFAULT_ORACLE, START_FEN,
};
use perft_debugger::repl::{self, ReplOptions};
use perft_debugger::report::RenderConfig;
use perft_debugger::{NavigationState, OneShotEngine, SessionEngine};

/// Find where a move generator's perft counts diverge from a reference engine.
#[derive(Debug, Parser)]
#[command(name = "perft_debugger", version)]
struct Cli {
    /// Move generator under test, run as `<SUBJECT> <depth> <fen> [moves]`
    subject: String,

    /// Argument passed to the subject before the perft arguments (repeatable)
    #[arg(long = "subject-arg", value_name = "ARG", allow_hyphen_values = true)]
    subject_args: Vec<String>,

    /// UCI engine used as the reference
    #[arg(long, env = "PERFT_ORACLE", default_value = DEFAULT_ORACLE)]
    oracle: String,

    /// Argument passed to the oracle on startup (repeatable)
    #[arg(long = "oracle-arg", value_name = "ARG", allow_hyphen_values = true)]
    oracle_args: Vec<String>,

    /// Lines to read while waiting for the oracle's `uciok`
    #[arg(long, default_value_t = DEFAULT_HANDSHAKE_LINES)]
    handshake_lines: usize,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Starting position
    #[arg(long, default_value = START_FEN)]
    fen: String,

    /// Starting total depth
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,
}

impl Cli {
    fn into_config(self) -> DebuggerConfig {
        let mut config =
            DebuggerConfig::new(EngineCommand::with_args(self.subject, self.subject_args));
        config.oracle = EngineCommand::with_args(self.oracle, self.oracle_args);
        config.handshake_lines = self.handshake_lines;
        config.color = self.color;
        config.initial_fen = self.fen;
        config.initial_depth = self.depth;
        config
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging();

    match run(cli.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nFATAL ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: DebuggerConfig) -> Result<()> {
    if !config.subject.is_usable() {
        bail!("subject `{}` cannot be executed", config.subject);
    }

    let mut out = io::stdout().lock();
    repl::print_help(&mut out)?;

    let oracle = SessionEngine::start(&config.oracle, config.handshake_lines).with_context(|| {
        format!(
            "could not start oracle `{}`; is it installed and on your PATH?",
            config.oracle
        )
    })?;
    let subject = OneShotEngine::new(config.subject.clone());

    let mut state = NavigationState::new(subject, oracle);
    state.set_fen(config.initial_fen.clone());
    state.set_depth(config.initial_depth)?;

    let (subject_label, oracle_label) = state.engine_names();
    let options = ReplOptions {
        render: RenderConfig::new(config.color.enabled()).with_labels(subject_label, oracle_label),
        prompt: io::stdout().is_terminal(),
    };

    repl::run(
        &mut state,
        io::stdin().lock(),
        &mut out,
        &mut io::stderr(),
        &options,
    )?;

    let (_, oracle) = state.into_engines();
    oracle.shutdown();
    Ok(())
}
