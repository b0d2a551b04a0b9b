//! TUI event types
//!
//! Defines the commands sent TO the controller task. Events coming FROM it
//! are plain [`UiEvent`](therabot_application::UiEvent)s.

use std::path::PathBuf;

/// Commands sent from the TUI event loop to the controller task (Actor inbox)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiCommand {
    /// User submitted a message
    Send(String),
    /// Write the conversation to a print view
    Print(Option<PathBuf>),
    /// Discard the conversation and start a new session
    Reset,
    /// Graceful shutdown
    Quit,
}
