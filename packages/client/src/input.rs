//! Parsing of terminal input lines.

/// What a line typed by the user asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send a chat message
    Say(String),
    /// `/name <new name>`
    Rename(String),
    /// `/who`
    Who,
    /// `/quit`
    Quit,
    /// Blank line or a command missing its argument
    Empty,
}

pub fn parse_input(line: &str) -> InputCommand {
    let line = line.trim();
    if line.is_empty() {
        return InputCommand::Empty;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match command {
        "/name" if rest.is_empty() => InputCommand::Empty,
        "/name" => InputCommand::Rename(rest.to_string()),
        "/who" => InputCommand::Who,
        "/quit" | "/exit" => InputCommand::Quit,
        _ => InputCommand::Say(line.to_string()),
    }
}
