//! Parsing of input lines into client commands.

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/create <room>`
    Create(String),
    /// `/join <room>`
    Join(String),
    /// `/switch <room>`
    Switch(String),
    /// `/rooms`
    Rooms,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Anything else: a chat line for the active room
    Say(String),
    /// Blank line
    Empty,
    /// Unknown slash command
    Unknown(String),
}

impl Command {
    /// Parse a line.
    ///
    /// A leading `//` escapes the slash, so `//shrug` sends `/shrug`.
    pub fn parse(line: &str) -> Self {
        if line.trim().is_empty() {
            return Self::Empty;
        }

        if let Some(escaped) = line.strip_prefix("//") {
            return Self::Say(format!("/{escaped}"));
        }

        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Self::Say(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim_end(), ""),
        };

        match name {
            "create" => Self::Create(arg.to_string()),
            "join" => Self::Join(arg.to_string()),
            "switch" => Self::Switch(arg.to_string()),
            "rooms" => Self::Rooms,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  /create <room>   create a room (same as /join) and make it active
  /join <room>     join a room and make it active
  /switch <room>   make an already joined room active
  /rooms           list joined rooms
  /help            show this help
  /quit            leave
Any other line is sent to the active room. Start a line with // to send a leading /.";
