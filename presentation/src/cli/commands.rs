//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use therabot_domain::ResponseMode;

/// How replies to `/chat` are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Decide from the response Content-Type
    Auto,
    /// Always parse a single JSON body
    Whole,
    /// Always read `data:` frames
    Stream,
}

impl From<ModeArg> for ResponseMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => ResponseMode::Auto,
            ModeArg::Whole => ResponseMode::Whole,
            ModeArg::Stream => ResponseMode::Stream,
        }
    }
}

/// CLI arguments for therabot-chat
#[derive(Parser, Debug)]
#[command(name = "therabot-chat")]
#[command(author, version, about = "Terminal client for the therabot chat server")]
#[command(long_about = r#"
therabot-chat opens a session on a therabot server and lets you chat with it,
either in a full-screen terminal UI or in a plain line-based REPL.

Inside the chat, these commands are available:
  /help           Show the command list
  /print [PATH]   Write the conversation to a printable HTML file
  /reset          Discard the conversation and start a new session
  /quit           Exit

Configuration files are loaded from (in priority order):
1. --config <path>                         Explicit config file
2. ./therabot.toml or ./.therabot.toml     Project-level config
3. ~/.config/therabot-chat/config.toml     Global config

Example:
  therabot-chat --server http://127.0.0.1:8000
  therabot-chat --plain --mode stream
  echo "hello" | therabot-chat --plain --no-color
"#)]
pub struct Cli {
    /// Base URL of the chat server
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// How replies are read (overrides `server.response_mode`)
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Use the line-based REPL instead of the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Append every transcript change to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub log_conversation: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Response mode requested on the command line, if any.
    pub fn response_mode(&self) -> Option<ResponseMode> {
        self.mode.map(ResponseMode::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["therabot-chat"]).unwrap();
        assert!(cli.server.is_none());
        assert!(cli.response_mode().is_none());
        assert!(!cli.plain);
        assert!(!cli.no_color);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "therabot-chat",
            "--server",
            "http://localhost:9000",
            "--mode",
            "stream",
            "--plain",
            "--no-color",
            "--log-conversation",
            "/tmp/chat.jsonl",
            "--config",
            "custom.toml",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.server.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.response_mode(), Some(ResponseMode::Stream));
        assert!(cli.plain);
        assert!(cli.no_color);
        assert_eq!(
            cli.log_conversation,
            Some(PathBuf::from("/tmp/chat.jsonl"))
        );
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["therabot-chat", "--mode", "fast"]).is_err());
    }
}
