//! Line-based rendering of UiEvents

use crate::output::console::ConsoleFormatter;
use crate::output::sanitize::strip_controls;
use crate::progress::reporter::ReplyProgress;
use std::io::{self, Write};
use therabot_application::UiEvent;
use therabot_domain::{ClientPhase, Role};
use tracing::debug;

/// Continuation indent for message content
const INDENT: &str = "  ";

/// Prints transcript changes to a writer as they happen.
///
/// A bot message stays "open" after it is appended so streamed deltas can
/// be written inline; the line is closed by the next message, a phase
/// change back to idle, or a notice. Printed lines cannot be taken back, so
/// a replaced message is printed again below.
///
/// Message text is printed without control characters.
pub struct PlainView<W: Write> {
    out: W,
    progress: ReplyProgress,
    echo_user: bool,
    open_message: Option<usize>,
}

impl<W: Write> PlainView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            progress: ReplyProgress::new(false),
            echo_user: true,
            open_message: None,
        }
    }

    /// Show a spinner while waiting on the server.
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = ReplyProgress::new(enabled);
        self
    }

    /// Print the user's own messages too (off when a person is typing them).
    pub fn with_echo_user(mut self, echo: bool) -> Self {
        self.echo_user = echo;
        self
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(mut self) -> W {
        self.progress.finish();
        self.out
    }

    /// Render one event.
    pub fn apply(&mut self, event: UiEvent) -> io::Result<()> {
        match event {
            UiEvent::MessageAppended { index, message } => {
                self.progress.finish();
                self.close_message()?;
                match message.role {
                    Role::User if !self.echo_user => {}
                    Role::Bot => {
                        write!(
                            self.out,
                            "{}\n{}{}",
                            ConsoleFormatter::label(message.role),
                            INDENT,
                            indent_continuations(&strip_controls(&message.content))
                        )?;
                        self.open_message = Some(index);
                    }
                    _ => writeln!(self.out, "{}", ConsoleFormatter::format_message(&message))?,
                }
            }
            UiEvent::MessageUpdated { index, delta } => {
                self.progress.finish();
                if self.open_message == Some(index) {
                    write!(self.out, "{}", indent_continuations(&strip_controls(&delta)))?;
                } else {
                    debug!(index, "Delta for a message that is not open");
                }
            }
            UiEvent::MessageReplaced { index, message } => {
                self.progress.finish();
                self.close_message()?;
                debug!(index, role = %message.role, "Message replaced");
                writeln!(self.out, "{}", ConsoleFormatter::format_message(&message))?;
            }
            UiEvent::TranscriptCleared => {
                self.close_message()?;
                writeln!(self.out, "{}", ConsoleFormatter::reset_marker())?;
            }
            UiEvent::PhaseChanged(phase) => {
                self.progress.on_phase(phase);
                if phase == ClientPhase::Idle {
                    self.close_message()?;
                }
            }
            UiEvent::Notice(text) => {
                self.progress.finish();
                self.close_message()?;
                writeln!(self.out, "{}", ConsoleFormatter::format_notice(&text))?;
            }
            UiEvent::InputCleared | UiEvent::InputFocused | UiEvent::ScrollToBottom(_) => {}
        }
        self.out.flush()
    }

    /// Print a notice that did not come from the client.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        self.close_message()?;
        writeln!(self.out, "{}", ConsoleFormatter::format_notice(text))?;
        self.out.flush()
    }

    fn close_message(&mut self) -> io::Result<()> {
        if self.open_message.take().is_some() {
            writeln!(self.out)?;
        }
        Ok(())
    }
}

fn indent_continuations(text: &str) -> String {
    text.replace('\n', &format!("\n{}", INDENT))
}
