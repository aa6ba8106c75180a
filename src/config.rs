//! Session configuration.

use std::fmt;
use std::io::IsTerminal;
use std::path::Path;

/// Standard chess starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Oracle binary looked up on `PATH` when none is configured.
pub const DEFAULT_ORACLE: &str = "stockfish";

/// Maximum number of lines read while waiting for the oracle's `uciok`.
pub const DEFAULT_HANDSHAKE_LINES: usize = 50;

/// A program plus the leading arguments passed before any protocol arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EngineCommand {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        EngineCommand {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EngineCommand {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the program can plausibly be started.
    ///
    /// Bare names are left to the `PATH` lookup at spawn time; anything with
    /// a directory component must be an executable regular file.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        let program = self.program.trim();
        if program.is_empty() {
            return false;
        }
        let path = Path::new(program);
        path.components().count() == 1 || is_executable_file(path)
    }
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// When to emit ANSI colours in the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Colour only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against the current stdout.
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Everything needed to open a debugging session.
#[derive(Debug, Clone)]
pub struct DebuggerConfig {
    pub subject: EngineCommand,
    pub oracle: EngineCommand,
    pub handshake_lines: usize,
    pub color: ColorMode,
    pub initial_fen: String,
    pub initial_depth: u32,
}

impl DebuggerConfig {
    #[must_use]
    pub fn new(subject: EngineCommand) -> Self {
        DebuggerConfig {
            subject,
            oracle: EngineCommand::new(DEFAULT_ORACLE),
            handshake_lines: DEFAULT_HANDSHAKE_LINES,
            color: ColorMode::default(),
            initial_fen: START_FEN.to_string(),
            initial_depth: 1,
        }
    }
}
