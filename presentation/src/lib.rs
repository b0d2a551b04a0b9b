//! Presentation layer for therabot-chat
//!
//! This crate contains the CLI definition, the full-screen terminal UI, the
//! plain line-based REPL, and the console/markup formatting they share.

pub mod chat;
pub mod cli;
pub mod command;
pub mod markup;
pub mod output;
pub mod progress;
pub mod tui;

// Re-export commonly used types
pub use chat::{ChatRepl, PlainView};
pub use cli::commands::{Cli, ModeArg};
pub use command::{SlashCommand, UserInput, parse_input};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ReplyProgress;
pub use tui::{TuiApp, TuiOptions};
