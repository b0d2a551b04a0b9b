//! Background controller task (Actor pattern)
//!
//! Owns the ChatClient and processes commands from the TUI event loop one
//! at a time, so at most one request is ever in flight.

use super::event::TuiCommand;
use std::future::Future;
use therabot_application::ChatClient;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub(super) async fn controller_task(
    mut client: ChatClient,
    mut cmd_rx: mpsc::UnboundedReceiver<TuiCommand>,
    cancellation: CancellationToken,
) {
    // Start the session before accepting input
    if until_cancelled(&cancellation, client.initialize())
        .await
        .is_none()
    {
        return;
    }

    loop {
        let cmd = tokio::select! {
            biased;
            _ = cancellation.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(c) => c,
                None => break, // Channel closed
            },
        };

        let completed = match cmd {
            TuiCommand::Send(text) => until_cancelled(&cancellation, client.send_message(&text))
                .await
                .is_some(),
            TuiCommand::Print(destination) => {
                // The outcome is reported to the view as a notice
                let _ = client.print_conversation(destination.as_deref());
                true
            }
            TuiCommand::Reset => until_cancelled(&cancellation, client.reset())
                .await
                .is_some(),
            TuiCommand::Quit => false,
        };
        if !completed {
            break;
        }
    }

    debug!(
        messages = client.transcript().len(),
        "Controller task stopped"
    );
}

/// Run `future` unless the token fires first.
async fn until_cancelled<F: Future>(
    cancellation: &CancellationToken,
    future: F,
) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancellation.cancelled() => None,
        output = future => Some(output),
    }
}
