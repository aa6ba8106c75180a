#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Rest of the line, trimmed; may be empty
    Fen(String),
    /// `None` if the argument is missing or not a number
    Depth(Option<u32>),
    Move(Option<String>),
    Unmove,
    Root,
    Diff,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<ReplCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };
    let first_arg = || rest.split_whitespace().next();

    let cmd = match word {
        "fen" => ReplCommand::Fen(rest.to_string()),
        "depth" => ReplCommand::Depth(first_arg().and_then(|v| v.parse::<u32>().ok())),
        "move" | "child" => ReplCommand::Move(first_arg().map(str::to_string)),
        "unmove" | "parent" => ReplCommand::Unmove,
        "root" => ReplCommand::Root,
        "diff" => ReplCommand::Diff,
        "help" => ReplCommand::Help,
        "exit" | "quit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(word.to_string()),
    };

    Some(cmd)
}
