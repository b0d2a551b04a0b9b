//! Slash commands shared by the terminal UI and the plain REPL
//!
//! A line whose first character is `/` is a command; leading whitespace
//! makes it a message. `//` escapes a leading slash, so `//etc` sends the
//! message `/etc`.

use std::path::PathBuf;

/// Commands understood by both views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Show the command list
    Help,
    /// Write the conversation to a printable document
    Print(Option<PathBuf>),
    /// Discard the conversation and start a new session
    Reset,
    /// Leave the client
    Quit,
}

/// What a line of user input turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Text to send to the server, untrimmed
    Message(String),
    Command(SlashCommand),
    /// `/something` that is not a known command
    Unknown(String),
}

/// Help lines listing every command.
pub const HELP_LINES: &[(&str, &str)] = &[
    ("/help, /h, /?", "Show this help"),
    ("/print [PATH]", "Write the conversation to a printable HTML file"),
    ("/reset", "Discard the conversation and start a new session"),
    ("/quit, /exit, /q", "Exit"),
    ("//text", "Send a message that starts with '/'"),
];

/// Classify one line of input.
pub fn parse_input(line: &str) -> UserInput {
    if let Some(escaped) = line.strip_prefix("//") {
        return UserInput::Message(format!("/{}", escaped));
    }
    let Some(body) = line.strip_prefix('/') else {
        return UserInput::Message(line.to_string());
    };

    let body = body.trim();
    let (name, arg) = match body.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (body, ""),
    };

    match name {
        "help" | "h" | "?" => UserInput::Command(SlashCommand::Help),
        "print" | "p" => {
            let destination = (!arg.is_empty()).then(|| PathBuf::from(arg));
            UserInput::Command(SlashCommand::Print(destination))
        }
        "reset" | "new" => UserInput::Command(SlashCommand::Reset),
        "quit" | "exit" | "q" => UserInput::Command(SlashCommand::Quit),
        _ => UserInput::Unknown(format!("/{}", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            parse_input("  hello there "),
            UserInput::Message("  hello there ".to_string())
        );
    }

    #[test]
    fn test_known_commands() {
        assert_eq!(parse_input("/help"), UserInput::Command(SlashCommand::Help));
        assert_eq!(parse_input("/?"), UserInput::Command(SlashCommand::Help));
        assert_eq!(parse_input("/reset"), UserInput::Command(SlashCommand::Reset));
        assert_eq!(parse_input("/q"), UserInput::Command(SlashCommand::Quit));
        assert_eq!(parse_input("/exit "), UserInput::Command(SlashCommand::Quit));
    }

    #[test]
    fn test_indented_slash_is_a_message() {
        assert_eq!(
            parse_input("  /help me"),
            UserInput::Message("  /help me".to_string())
        );
    }

    #[test]
    fn test_print_with_and_without_path() {
        assert_eq!(
            parse_input("/print"),
            UserInput::Command(SlashCommand::Print(None))
        );
        assert_eq!(
            parse_input("/print  out/chat.html "),
            UserInput::Command(SlashCommand::Print(Some(PathBuf::from("out/chat.html"))))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_input("/frobnicate now"),
            UserInput::Unknown("/frobnicate".to_string())
        );
    }

    #[test]
    fn test_double_slash_escapes() {
        assert_eq!(
            parse_input("//etc/hosts"),
            UserInput::Message("/etc/hosts".to_string())
        );
    }
}
