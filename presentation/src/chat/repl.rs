//! REPL (Read-Eval-Print Loop) for interactive chat

use super::view::PlainView;
use crate::command::{SlashCommand, UserInput, parse_input};
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use std::future::Future;
use std::io::{self, Write};
use therabot_application::{ChatClient, UiEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Line-based chat REPL
pub struct ChatRepl {
    client: ChatClient,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    server_label: String,
    interactive: bool,
    cancellation: CancellationToken,
}

impl ChatRepl {
    /// Create a REPL around a client and the receiving end of its UiEvent
    /// channel.
    pub fn new(client: ChatClient, ui_rx: mpsc::UnboundedReceiver<UiEvent>) -> Self {
        Self {
            client,
            ui_rx,
            server_label: String::new(),
            interactive: false,
            cancellation: CancellationToken::new(),
        }
    }

    /// Server address shown in the banner
    pub fn with_server_label(mut self, label: impl Into<String>) -> Self {
        self.server_label = label.into();
        self
    }

    /// Whether a person is typing: enables the prompt and spinner, and
    /// stops echoing user messages back.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Stop reading (and abandon a pending reply) once the token fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Run against the process's stdin and stdout.
    pub async fn run(self) -> io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_with(stdin, io::stdout()).await.map(|_| ())
    }

    /// Run against arbitrary input and output; returns the writer when the
    /// input ends or `/quit` is entered.
    pub async fn run_with<R, W>(self, input: R, out: W) -> io::Result<W>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let ChatRepl {
            mut client,
            mut ui_rx,
            server_label,
            interactive,
            cancellation,
        } = self;

        let mut view = PlainView::new(out)
            .with_progress(interactive)
            .with_echo_user(!interactive);

        if interactive {
            writeln!(view.writer(), "{}\n", ConsoleFormatter::header(&server_label))?;
        }

        if pump(client.initialize(), &mut ui_rx, &mut view, &cancellation)
            .await?
            .is_none()
        {
            return Ok(view.into_inner());
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                write!(view.writer(), "{} ", ">".cyan().bold())?;
                view.writer().flush()?;
            }

            let line = tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                debug!("Input closed");
                break;
            };

            let finished = match parse_input(&line) {
                UserInput::Message(text) => {
                    pump(client.send_message(&text), &mut ui_rx, &mut view, &cancellation)
                        .await?
                        .is_none()
                }
                UserInput::Command(SlashCommand::Help) => {
                    write!(view.writer(), "{}", ConsoleFormatter::help())?;
                    false
                }
                UserInput::Command(SlashCommand::Print(destination)) => {
                    // The outcome arrives as a notice event
                    let _ = client.print_conversation(destination.as_deref());
                    drain(&mut ui_rx, &mut view)?;
                    false
                }
                UserInput::Command(SlashCommand::Reset) => {
                    pump(client.reset(), &mut ui_rx, &mut view, &cancellation)
                        .await?
                        .is_none()
                }
                UserInput::Command(SlashCommand::Quit) => true,
                UserInput::Unknown(name) => {
                    view.notice(&format!("Unknown command: {} (try /help)", name))?;
                    false
                }
            };
            if finished {
                break;
            }
        }

        info!(messages = client.transcript().len(), "Leaving chat");
        if interactive {
            writeln!(view.writer(), "Bye!")?;
        }
        Ok(view.into_inner())
    }
}

/// Drive a client future while rendering the events it emits.
///
/// Returns `None` when cancelled before the future finished.
async fn pump<F, W>(
    future: F,
    ui_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    view: &mut PlainView<W>,
    cancellation: &CancellationToken,
) -> io::Result<Option<F::Output>>
where
    F: Future,
    W: Write,
{
    tokio::pin!(future);
    loop {
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => return Ok(None),
            output = &mut future => {
                drain(ui_rx, view)?;
                return Ok(Some(output));
            }
            Some(event) = ui_rx.recv() => view.apply(event)?,
        }
    }
}

/// Render every event already queued.
fn drain<W: Write>(
    ui_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    view: &mut PlainView<W>,
) -> io::Result<()> {
    while let Ok(event) = ui_rx.try_recv() {
        view.apply(event)?;
    }
    Ok(())
}
